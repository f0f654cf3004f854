// Step 2: profile scoring.
// Unlike detection, a failure here aborts the run: there is nothing to render.

pub mod prompts;
pub mod scorer;

pub use scorer::score_profile;
