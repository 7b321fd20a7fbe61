use reqwest::Url;

use crate::net::error::NetError;
use crate::portfolio::contact::ContactForm;

/// Chat deep link carrying the submitted form as prefilled text. The text is
/// percent-encoded, spaces included, rather than form-encoded.
pub fn chat_link(base: &str, number: &str, form: &ContactForm) -> Result<Url, NetError> {
    let text = format!(
        "Name: {}\nEmail: {}\nMessage: {}",
        form.name, form.email, form.message
    );

    let mut url = Url::parse(base).map_err(|e| NetError::Unsupported(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| NetError::Unsupported(format!("{base} cannot carry a path")))?
        .pop_if_empty()
        .push(number);
    url.set_query(Some(&format!("text={}", urlencoding::encode(&text))));
    Ok(url)
}

/// Open `url` in a new browsing context.
pub fn open_in_new_tab(url: &str) -> Result<(), NetError> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window()
            .ok_or_else(|| NetError::Unsupported("no browser window".to_string()))?;
        window
            .open_with_url_and_target(url, "_blank")
            .map_err(|e| NetError::Unsupported(format!("window.open failed: {e:?}")))?;
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        bevy::log::info!("Open in browser: {}", url);
        Ok(())
    }
}
