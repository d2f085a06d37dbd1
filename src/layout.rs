//! Split Pane Geometry
//!
//! Separator position tracking for the two-pane layout.

/// Golden ratio
pub const PHI: f64 = 1.618_033_988_749_895;

/// Separator start position, in percent of the container
pub const INITIAL_POSITION: f64 = (1.0 - 1.0 / PHI) * 100.0;

pub const MIN_POSITION: f64 = 10.0;
pub const MAX_POSITION: f64 = 90.0;

/// Default separator thickness
pub const SEPARATOR_WIDTH: &str = "0.1em";

/// Primary button bit of `MouseEvent.buttons`
const PRIMARY_BUTTON: u16 = 1;

/// Which axis the separator moves along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Panes side by side, separator moves horizontally
    #[default]
    Vertical,
    /// Panes stacked, separator moves vertically
    Horizontal,
}

impl Orientation {
    /// CSS properties for (extent along the axis, cross extent, offset)
    fn properties(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Orientation::Vertical => ("width", "height", "left"),
            Orientation::Horizontal => ("height", "width", "top"),
        }
    }

    pub fn cursor(self) -> &'static str {
        match self {
            Orientation::Vertical => "ew-resize",
            Orientation::Horizontal => "ns-resize",
        }
    }

    /// Pick the tracked coordinate out of an (x, y) pair
    pub fn pick(self, x: f64, y: f64) -> f64 {
        match self {
            Orientation::Vertical => x,
            Orientation::Horizontal => y,
        }
    }
}

/// Separator position and drag flag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitState {
    pub position: f64,
    pub dragging: bool,
}

impl Default for SplitState {
    fn default() -> Self {
        Self {
            position: INITIAL_POSITION,
            dragging: false,
        }
    }
}

impl SplitState {
    pub fn grab(&mut self) {
        self.dragging = true;
    }

    /// Track a pointer move. Ends the drag once the primary button is up.
    pub fn on_move(&mut self, pointer: f64, origin: f64, size: f64, buttons: u16) {
        if !self.dragging {
            return;
        }
        if buttons & PRIMARY_BUTTON == 0 {
            self.dragging = false;
            return;
        }
        if size <= 0.0 {
            return;
        }
        self.position = ((pointer - origin) / size * 100.0).clamp(MIN_POSITION, MAX_POSITION);
    }

    /// Inline styles for (first pane, separator, second pane)
    pub fn pane_styles(&self, orientation: Orientation, separator_width: &str) -> [String; 3] {
        let (extent, cross, offset) = orientation.properties();
        let p = self.position;
        let half = format!("{} / 2", separator_width);
        [
            format!(
                "position: absolute; overflow: hidden; {cross}: 100%; {offset}: 0; {extent}: calc({p}% - {half});"
            ),
            format!(
                "position: absolute; cursor: {}; {cross}: 100%; {offset}: calc({p}% - {half}); {extent}: {separator_width};",
                orientation.cursor()
            ),
            format!(
                "position: absolute; overflow: hidden; {cross}: 100%; {offset}: calc({p}% + {half}); {extent}: calc({}% - {half});",
                100.0 - p
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_position_is_golden_split() {
        assert!((INITIAL_POSITION - 38.196_601).abs() < 1e-5);
        assert_eq!(SplitState::default().position, INITIAL_POSITION);
    }

    #[test]
    fn test_drag_sets_position_and_clamps() {
        let mut split = SplitState::default();
        split.grab();
        split.on_move(700.0, 0.0, 1000.0, 1);
        assert!((split.position - 70.0).abs() < 1e-9);
        split.on_move(950.0, 0.0, 1000.0, 1);
        assert_eq!(split.position, 90.0);
        split.on_move(20.0, 0.0, 1000.0, 1);
        assert_eq!(split.position, 10.0);
    }

    #[test]
    fn test_released_button_ends_drag() {
        let mut split = SplitState::default();
        split.grab();
        split.on_move(500.0, 100.0, 1000.0, 0);
        assert!(!split.dragging);
        assert_eq!(split.position, INITIAL_POSITION);
        split.on_move(700.0, 0.0, 1000.0, 1);
        assert_eq!(split.position, INITIAL_POSITION);
    }

    #[test]
    fn test_origin_offsets_pointer() {
        let mut split = SplitState::default();
        split.grab();
        split.on_move(600.0, 100.0, 1000.0, 1);
        assert!((split.position - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_horizontal_styles_use_top_and_height() {
        let split = SplitState { position: 50.0, dragging: false };
        let [first, sep, second] = split.pane_styles(Orientation::Horizontal, SEPARATOR_WIDTH);
        assert_eq!(SEPARATOR_WIDTH, "0.1em");
        assert!(first.contains("height: calc(50% - 0.1em / 2)"));
        assert!(sep.contains("ns-resize"));
        assert!(second.contains("top: calc(50% + 0.1em / 2)"));
    }
}
