//! Domain model (card records, ids, store state, errors).

pub mod card;
pub mod errors;
pub mod ids;
pub mod state;

pub use card::{
    BackgroundColor, Card, CardFields, DEFAULT_BACKGROUND_COLOR, DEFAULT_BOTTOM_TEXT,
    DEFAULT_TITLE, FontFamily, Swatch,
};
pub use errors::StoreError;
pub use ids::CardId;
pub use state::StoreState;
