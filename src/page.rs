//! Page Setup
//!
//! Reads the render-time setup the server embeds in the page.

use chrono::NaiveDateTime;
use rental_engine::FormSetup;

/// ID of the `<script type="application/json">` element holding the setup
pub const SETUP_ELEMENT_ID: &str = "rental-form-setup";

/// Load the setup document, falling back to an empty form
pub fn load_setup() -> FormSetup {
    let text = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id(SETUP_ELEMENT_ID))
        .and_then(|el| el.text_content())
        .unwrap_or_default();

    match FormSetup::from_json(&text) {
        Ok(setup) => {
            log::debug!("loaded setup with {} items", setup.items.len());
            setup
        }
        Err(err) => {
            log::error!("{}", err);
            FormSetup::default()
        }
    }
}

/// Local wall-clock time of the browser
pub fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}
