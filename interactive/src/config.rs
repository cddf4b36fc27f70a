use web_sys::window;

/// Prefix the Django app is mounted under when the host page says nothing.
pub const DEFAULT_API_BASE: &str = "/djangoapp";

/// API prefix from `<meta name="showroom-api" content="...">` in the host
/// page, without a trailing slash. An empty `content` means same-origin root.
pub fn api_base() -> String {
    let configured = window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.query_selector("meta[name='showroom-api']").ok().flatten())
        .and_then(|el| el.get_attribute("content"));

    match configured {
        Some(url) => url.trim_end_matches('/').to_string(),
        None => DEFAULT_API_BASE.to_string(),
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn meta_tag_overrides_default_base() {
        let doc = window().and_then(|w| w.document()).expect("document");
        assert_eq!(api_base(), DEFAULT_API_BASE);

        let meta = doc.create_element("meta").expect("meta element");
        meta.set_attribute("name", "showroom-api").expect("name");
        meta.set_attribute("content", "https://cars.example.com/api/").expect("content");
        doc.head().expect("head").append_child(&meta).expect("append");

        assert_eq!(api_base(), "https://cars.example.com/api");
        meta.remove();
    }
}
