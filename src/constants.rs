/// Page elements and styling for the start prompt and plot surface.
///
/// The page ships without either element; both are created at runtime.
pub const START_PROMPT_ID: &str = "start-prompt";
pub const START_PROMPT_TEXT: &str = "Click to Start";
pub const START_PROMPT_STYLE: &str =
    "color: #cfe7ff; font: 16px system-ui; padding: 12px 16px; cursor: pointer;";

pub const CANVAS_ID: &str = "scope-canvas";
// Block display so the canvas does not add a scrollbar-inducing baseline gap
pub const CANVAS_STYLE: &str = "display: block;";

// Surface is never configured smaller than this
pub const MIN_SURFACE_PX: u32 = 1;
