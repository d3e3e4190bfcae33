//! Download of the current quest as a JSON document.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use super::types::QuestData;

/// Pretty-printed export document, two-space indented.
pub fn export_json(data: &QuestData) -> Result<String, serde_json::Error> {
	serde_json::to_string_pretty(data)
}

pub fn export_file_name(quest: &str) -> String {
	format!("{quest}.json")
}

/// Offer `contents` to the user as a downloaded file.
///
/// Uses a temporary object URL and a detached anchor click; both are cleaned
/// up before returning.
pub fn download_json(file_name: &str, contents: &str) -> Result<(), JsValue> {
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
	let document = window
		.document()
		.ok_or_else(|| JsValue::from_str("no document"))?;
	let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;

	let options = BlobPropertyBag::new();
	options.set_type("application/json");
	let parts = js_sys::Array::of1(&JsValue::from_str(contents));
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	link.set_href(&url);
	link.set_download(file_name);

	body.append_child(&link)?;
	link.click();
	body.remove_child(&link)?;

	Url::revoke_object_url(&url)
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn export_is_the_scene_list_without_positions() {
		let data: QuestData = serde_json::from_value(json!({
			"scenes": [{ "scene_id": "1", "text": "Start", "choices": [{ "text": "go", "next_scene": "2" }] }]
		}))
		.unwrap();
		let text = export_json(&data).unwrap();

		assert!(text.starts_with("{\n  \"scenes\": ["));
		let round: serde_json::Value = serde_json::from_str(&text).unwrap();
		assert_eq!(round["scenes"][0]["choices"][0]["next_scene"], "2");
		assert!(!text.contains("position"));
	}

	#[test]
	fn file_is_named_after_the_quest() {
		assert_eq!(export_file_name("dark_tower"), "dark_tower.json");
	}
}
