//! # digits_core
//!
//! UI-agnostic numeric input behavior for single-line text fields.
//!
//! The crate constrains what a user can type into a field to numbers and
//! renders the committed value through locale-aware decimal formatting:
//! - [`FormatSpec`]: integer/fraction limits parsed from a digit-info string
//! - [`filter_numeric`]: full-width glyph remap plus numeric run extraction
//! - [`validate_keystroke`]: per-keystroke accept/reject against digit limits
//! - [`commit_value`]: filter, truncate, parse, and format on blur or Enter
//! - [`DigitsController`]: event dispatch tying the above to a field
//!
//! ## Design Principles
//!
//! Nothing here depends on a UI toolkit. Hosts implement [`FieldHost`] for
//! their text widget, forward events as [`FieldEvent`]s, and honor the
//! returned [`Decision`]. Time is supplied by the host, so Enter commits
//! run on the host's own event loop.
//!
//! ## Integration
//!
//! ```ignore
//! // In your widget's key handler:
//! let decision = controller.handle_event(&FieldEvent::KeyDown(key), now, &mut widget, &mut bus)?;
//! if !decision.allows_native_edit() {
//!     event.prevent_default();
//! }
//! // And on every frame/timer tick:
//! controller.run_due(now, &mut widget, &mut bus)?;
//! ```

mod buffer;
mod commit;
mod config;
mod context;
mod controller;
mod decimal;
mod error;
mod filter;
mod format_spec;
mod key;
mod locale;
mod scheduler;
mod selection;
mod text;
mod traits;
mod validator;

pub mod script;

pub use buffer::TextBuffer;
pub use commit::{commit_value, limit_digits, parse_number};
pub use config::{DEFAULT_ENTER_DELAY_MS, DigitsConfig, EnterPolicy};
pub use context::EditContext;
pub use controller::{Decision, DigitsController, FieldEvent};
pub use decimal::{format_decimal, plain_number};
pub use error::{ConfigurationError, ScriptError};
pub use filter::{
    FULL_WIDTH_GLYPHS, GROUP_SEPARATOR, NumericShape, filter_numeric, remap_glyph, remap_glyphs,
    strip_grouping,
};
pub use format_spec::{DigitLimits, FormatSpec, ValueParts};
pub use key::{ALLOWED_KEY_CODES, Key, KeyInput, codes};
pub use locale::{DEFAULT_LOCALE, LocaleData};
pub use scheduler::{CommitHandle, DeferredCommits, PendingCommit};
pub use selection::SelectionRange;
pub use traits::{FieldHost, FieldObserver, Notification};
pub use validator::{KeyVerdict, Veto, validate_keystroke};

// Offset helpers for hosts that map their own caret positions.
pub use text::{
    clamp_to_char_boundary, grouping_before, next_cursor_boundary, prev_cursor_boundary,
    strip_grouping_at,
};
