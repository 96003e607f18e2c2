//! Presenter trait abstraction.
//!
//! The session emits state transitions; rendering them (chat bubbles,
//! spinners, scroll position) is entirely the presenter's concern. Incremental
//! updates always carry the full accumulated text, not a diff - re-rendering
//! the whole text avoids partial-fragment rendering bugs.

use crate::models::ParsedAnswer;

/// Receives the state transitions of one streaming session.
///
/// Call order per session: `show_loading`, zero or more `incremental`
/// updates, then exactly one of `completed` / `failed`. `hide_loading` fires
/// when the first event arrives and again before the final render;
/// implementations must tolerate repeated calls.
pub trait Presenter: Send {
    /// A query was submitted; show the waiting indicator.
    fn show_loading(&mut self);

    /// Remove the waiting indicator if it is shown.
    fn hide_loading(&mut self);

    /// The answer text grew; re-render the full text.
    fn incremental(&mut self, text: &str);

    /// The session completed; render the final parsed answer.
    fn completed(&mut self, answer: &ParsedAnswer);

    /// The session failed; render the error message verbatim.
    fn failed(&mut self, message: &str);
}
