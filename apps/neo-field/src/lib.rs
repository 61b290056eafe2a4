use wasm_bindgen::prelude::*;
use neo_engine::*;

pub mod bodies;
pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod feed;
pub mod game;
pub mod orbit;
pub mod projection;
pub mod ship;

use builder::FieldData;
use config::FieldConfig;
use error::LoadError;
use feed::{FeedGate, FeedParse};
use game::AsteroidField;
use neo_web::RunPhase;

neo_web::export_game!(AsteroidField, "neo-field");

thread_local! {
    static FEED_GATE: std::cell::RefCell<FeedGate> = std::cell::RefCell::new(FeedGate::new());
}

/// Override configuration before loading. Returns false if the document was
/// rejected or the field is already loaded.
#[wasm_bindgen]
pub fn game_configure(json: &str) -> bool {
    let config = match FieldConfig::from_json(json) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("{err}");
            return false;
        }
    };
    with_runner(|r| r.configure(|game| game.set_config(config)))
}

/// Hand over both datasets. Either one failing to parse ends the session in Error.
#[wasm_bindgen]
pub fn game_load(catalog_json: &str, feed_json: &str) {
    with_runner(|r| {
        if r.phase() != RunPhase::Loading {
            log::warn!("game_load called in {:?} phase, ignoring", r.phase());
            return;
        }
        let data = FieldData::parse(catalog_json, feed_json);
        if data.is_ok() {
            if let Ok(payload) = serde_json::from_str(feed_json) {
                FEED_GATE.with(|gate| gate.borrow_mut().admit(payload));
            }
        }
        r.resolve(data);
    });
}

/// The host could not fetch a dataset.
#[wasm_bindgen]
pub fn game_load_failed(dataset: &str, message: &str) {
    with_runner(|r| {
        r.fail(LoadError::Fetch {
            dataset: dataset.to_owned(),
            message: message.to_owned(),
        })
    });
}

/// Offer a re-fetched feed. Rebuilds the asteroids only when the content changed.
/// Returns whether a rebuild happened.
#[wasm_bindgen]
pub fn game_refresh_feed(feed_json: &str) -> bool {
    let payload: serde_json::Value = match serde_json::from_str(feed_json) {
        Ok(payload) => payload,
        Err(err) => {
            log::warn!("feed refresh is not valid JSON: {err}");
            return false;
        }
    };
    if !FEED_GATE.with(|gate| gate.borrow().is_fresh(&payload)) {
        log::debug!("feed unchanged, skipping refresh");
        return false;
    }
    let feed = match FeedParse::from_value(&payload) {
        Ok(feed) => feed,
        Err(err) => {
            log::warn!("feed refresh rejected: {err}");
            return false;
        }
    };

    let rebuilt = with_runner(|r| r.with_game(|game, ctx| game.refresh_asteroids(ctx, &feed))).is_some();
    if rebuilt {
        FEED_GATE.with(|gate| gate.borrow_mut().admit(payload));
    }
    rebuilt
}

#[wasm_bindgen]
pub fn get_refresh_interval_ms() -> u32 {
    with_runner(|r| r.game().field_config().feed.refresh_interval_ms)
}
