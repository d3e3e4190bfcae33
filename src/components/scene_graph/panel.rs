//! Leptos view for the inspector panel.
//!
//! A modal over the canvas showing the selected scene's text and choices,
//! each editable in place. Clicking a choice moves the panel to its target.

use leptos::ev;
use leptos::prelude::*;
use web_sys::{KeyboardEvent, MouseEvent};

use super::inspector::EditField;
use super::state::SceneGraphState;
use super::types::SceneNode;

/// Modal inspector for the node selected on the canvas.
///
/// Closes on the close button, a click on the backdrop, or Escape anywhere
/// in the window.
#[component]
pub fn InspectorPanel(state: RwSignal<SceneGraphState>) -> impl IntoView {
	let node = Memo::new(move |_| state.with(|s| s.inspected_node().cloned()));

	let escape = window_event_listener(ev::keydown, move |ev: KeyboardEvent| {
		if ev.key() == "Escape" && state.with_untracked(|s| s.inspector().is_open()) {
			state.update(|s| {
				s.key("Escape");
			});
		}
	});
	on_cleanup(move || escape.remove());

	let title = move || {
		node.with(|n| {
			n.as_ref()
				.map(|n| format!("Scene {}", n.id))
				.unwrap_or_default()
		})
	};
	let scene_text = Signal::derive(move || {
		node.with(|n| n.as_ref().map(|n| n.text.clone()).unwrap_or_default())
	});

	view! {
		<Show when=move || node.with(Option::is_some)>
			<div
				class="inspector-backdrop"
				on:click=move |ev: MouseEvent| {
					if ev.target() == ev.current_target() {
						state.update(SceneGraphState::close_inspector);
					}
				}
			>
				<div class="inspector" on:click=|ev: MouseEvent| ev.stop_propagation()>
					<button
						class="inspector-close"
						on:click=move |_| state.update(SceneGraphState::close_inspector)
					>
						"×"
					</button>
					<header class="inspector-header">
						<h2>{title}</h2>
					</header>
					<section class="inspector-scene">
						<h3>"Scene description"</h3>
						<EditableText
							state=state
							field=EditField::SceneText
							value=scene_text
							placeholder="No description"
						/>
					</section>
					{move || choice_list(state, node)}
				</div>
			</div>
		</Show>
	}
}

fn choice_list(state: RwSignal<SceneGraphState>, node: Memo<Option<SceneNode>>) -> AnyView {
	let choices = node.with(|n| n.as_ref().map(|n| n.choices.clone()).unwrap_or_default());
	if choices.is_empty() {
		return view! { <div class="inspector-final">"This is a final scene"</div> }.into_any();
	}

	let items = choices
		.into_iter()
		.enumerate()
		.map(|(i, choice)| {
			let text = Signal::derive(move || {
				node.with(|n| {
					n.as_ref()
						.and_then(|n| n.choices.get(i))
						.map(|c| c.text.clone())
						.unwrap_or_default()
				})
			});
			view! {
				<div class="inspector-choice" on:click=move |_| state.update(|s| s.follow_choice(i))>
					<EditableText state=state field=EditField::ChoiceText(i) value=text />
					<div class="inspector-choice-target">
						"→ leads to " <span class="inspector-next-scene">{choice.next_scene}</span>
					</div>
				</div>
			}
		})
		.collect_view();

	view! {
		<section class="inspector-choices">
			<h3>"Choices"</h3>
			{items}
		</section>
	}
	.into_any()
}

/// One field of the inspected node, viewed or edited in place.
#[component]
fn EditableText(
	state: RwSignal<SceneGraphState>,
	field: EditField,
	#[prop(into)] value: Signal<String>,
	#[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
	let editing = Memo::new(move |_| state.with(|s| s.inspector().is_editing(field)));

	move || {
		if editing.get() {
			let draft = state.with_untracked(|s| {
				s.inspector()
					.draft()
					.map(|d| d.value.clone())
					.unwrap_or_default()
			});
			view! {
				<div class="editable editing">
					<textarea
						class="editable-input"
						prop:value=draft
						on:input=move |ev| {
							let value = event_target_value(&ev);
							state.update(|s| s.set_draft(value));
						}
						on:click=|ev: MouseEvent| ev.stop_propagation()
					/>
					<div class="editable-actions">
						<button on:click=move |ev: MouseEvent| {
							ev.stop_propagation();
							state.update(|s| {
								s.save_edit();
							});
						}>"Save"</button>
						<button on:click=move |ev: MouseEvent| {
							ev.stop_propagation();
							state.update(SceneGraphState::cancel_edit);
						}>"Cancel"</button>
					</div>
				</div>
			}
			.into_any()
		} else {
			view! {
				<div class="editable">
					<span class="editable-text">
						{move || {
							let text = value.get();
							if text.is_empty() { placeholder.to_string() } else { text }
						}}
					</span>
					<button
						class="editable-edit"
						on:click=move |ev: MouseEvent| {
							ev.stop_propagation();
							state.update(|s| {
								s.begin_edit(field);
							});
						}
					>
						"Edit"
					</button>
				</div>
			}
			.into_any()
		}
	}
}
