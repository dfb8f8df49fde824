use js_sys::{Function, Object, Promise, Reflect};
use memory_match_core::WinSummary;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

const SHARE_TITLE: &str = "Memory Match";

/// Hands the win summary to `navigator.share` when the browser has it.
pub(crate) fn share_summary(summary: &WinSummary) {
    let window = gloo::utils::window();
    let text = summary.share_text();
    let url = window.location().href().unwrap_or_default();
    let navigator = window.navigator();

    let Some(share) = Reflect::get(&navigator, &JsValue::from_str("share"))
        .ok()
        .and_then(|share| share.dyn_into::<Function>().ok())
    else {
        log::info!("native sharing is not available: {} {}", text, url);
        return;
    };

    let data = Object::new();
    for (key, value) in [
        ("title", SHARE_TITLE),
        ("text", text.as_str()),
        ("url", url.as_str()),
    ] {
        if let Err(err) = Reflect::set(&data, &JsValue::from_str(key), &JsValue::from_str(value)) {
            log::error!("could not build share data: {:?}", err);
            return;
        }
    }

    match share.call1(&navigator, &data) {
        Ok(promise) => {
            let promise: Promise = promise.unchecked_into();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    log::debug!("share dismissed: {:?}", err);
                }
            });
        }
        Err(err) => log::warn!("share failed: {:?}", err),
    }
}
