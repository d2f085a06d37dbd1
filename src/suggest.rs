//! Suggestion Engine
//!
//! Option filtering, highlighted-index cycling and keyboard handling shared
//! by every autocompleting input.

/// Keep options whose lowercase form starts with the lowercase fragment.
/// Order is preserved; an empty fragment keeps everything.
pub fn filter_prefix(options: &[String], fragment: &str) -> Vec<String> {
    let fragment = fragment.to_lowercase();
    options
        .iter()
        .filter(|option| option.to_lowercase().starts_with(&fragment))
        .cloned()
        .collect()
}

/// Move the highlight through the stops `None, 0, .., len - 1`, wrapping.
pub fn cycle_index(index: Option<usize>, delta: isize, len: usize) -> Option<usize> {
    let stops = len as isize + 1;
    let current = index.map_or(0, |i| i as isize + 1);
    let next = (current + delta).rem_euclid(stops);
    if next == 0 {
        None
    } else {
        Some(next as usize - 1)
    }
}

/// Keys the suggestion list reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Tab,
    Enter,
    Other,
}

impl Key {
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowDown" => Key::ArrowDown,
            "ArrowUp" => Key::ArrowUp,
            "Tab" => Key::Tab,
            "Enter" => Key::Enter,
            _ => Key::Other,
        }
    }
}

/// What the input should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// The highlight moved; swallow the key
    Moved,
    /// Commit the highlighted option
    Commit,
    /// Let the browser handle the key
    Ignored,
}

/// Options, highlight and visibility of one focused input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionState {
    /// `None` until the first filtering pass
    pub options: Option<Vec<String>>,
    pub index: Option<usize>,
    pub visible: bool,
}

impl SuggestionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.options.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Recompute options for a new fragment. Visibility is left alone:
    /// only focus and edits open the list.
    ///
    /// When `previous` is given and the new fragment extends it, the current
    /// result set is narrowed instead of rescanning `source`.
    pub fn refilter(&mut self, source: &[String], previous: Option<&str>, fragment: &str) {
        let narrowed = match (&self.options, previous) {
            (Some(current), Some(previous)) if fragment.starts_with(previous) => {
                Some(filter_prefix(current, fragment))
            }
            _ => None,
        };
        let options = narrowed.unwrap_or_else(|| filter_prefix(source, fragment));
        self.index = match self.index {
            Some(i) if i >= options.len() => options.len().checked_sub(1),
            other => other,
        };
        self.options = Some(options);
    }

    pub fn step(&mut self, delta: isize) {
        self.index = cycle_index(self.index, delta, self.len());
    }

    /// Apply the keyboard contract and report what happened
    pub fn on_key(&mut self, key: Key) -> KeyAction {
        if !self.visible {
            return KeyAction::Ignored;
        }
        match key {
            Key::ArrowDown => {
                self.step(1);
                KeyAction::Moved
            }
            Key::ArrowUp => {
                self.step(-1);
                KeyAction::Moved
            }
            Key::Tab => match self.len() {
                0 => KeyAction::Ignored,
                1 => {
                    self.index = Some(0);
                    KeyAction::Commit
                }
                _ => {
                    self.step(1);
                    KeyAction::Moved
                }
            },
            Key::Enter if self.index.is_some() => KeyAction::Commit,
            Key::Enter | Key::Other => KeyAction::Ignored,
        }
    }

    pub fn selected(&self) -> Option<&str> {
        let index = self.index?;
        self.options.as_ref()?.get(index).map(String::as_str)
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Whether the dropdown should be drawn
    pub fn shows_dropdown(&self) -> bool {
        self.visible && !self.is_empty()
    }
}

/// An input that owns suggestion state and can splice in the highlighted option
pub trait Completion {
    fn text(&self) -> &str;
    fn suggestions(&self) -> &SuggestionState;
    fn suggestions_mut(&mut self) -> &mut SuggestionState;

    /// Apply the highlighted option. Returns whether the text changed.
    fn complete(&mut self) -> bool;

    /// Byte offset the caret should move to after a completion
    fn caret(&self) -> usize {
        self.text().len()
    }
}

/// Lazy option loading: fetched on first focus, never again
#[derive(Debug, Clone, Default, PartialEq)]
pub enum OptionSource {
    #[default]
    Idle,
    Loading,
    Ready(Vec<String>),
}

impl OptionSource {
    /// Move `Idle -> Loading`. Returns true only for the call that should fetch.
    pub fn begin_load(&mut self) -> bool {
        if *self == OptionSource::Idle {
            *self = OptionSource::Loading;
            true
        } else {
            false
        }
    }

    pub fn finish(&mut self, options: Vec<String>) {
        *self = OptionSource::Ready(options);
    }

    pub fn options(&self) -> &[String] {
        match self {
            OptionSource::Ready(options) => options,
            _ => &[],
        }
    }
}

/// Autocomplete over a single value: the whole input is the fragment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueAssist {
    pub source: OptionSource,
    pub suggestions: SuggestionState,
    value: String,
}

impl ValueAssist {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) {
        let previous = std::mem::replace(&mut self.value, value.to_string());
        self.suggestions.show();
        if self.source.options().is_empty() {
            return;
        }
        self.suggestions
            .refilter(self.source.options(), Some(&previous), value);
    }

    /// Options arrived: filter against the current value from scratch
    pub fn receive(&mut self, options: Vec<String>) {
        self.source.finish(options);
        let value = self.value.clone();
        self.suggestions.refilter(self.source.options(), None, &value);
    }
}

impl Completion for ValueAssist {
    fn text(&self) -> &str {
        &self.value
    }

    fn suggestions(&self) -> &SuggestionState {
        &self.suggestions
    }

    fn suggestions_mut(&mut self) -> &mut SuggestionState {
        &mut self.suggestions
    }

    fn complete(&mut self) -> bool {
        let Some(chosen) = self.suggestions.selected().map(str::to_string) else {
            return false;
        };
        if chosen == self.value {
            return false;
        }
        self.set_value(&chosen);
        self.suggestions.hide();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_filter_prefix_is_case_insensitive_and_ordered() {
        let options = opts(&["Red", "green", "RED-ish", "blue"]);
        assert_eq!(filter_prefix(&options, "re"), opts(&["Red", "RED-ish"]));
        assert_eq!(filter_prefix(&options, ""), options);
        assert!(filter_prefix(&options, "x").is_empty());
    }

    #[test]
    fn test_cycle_returns_to_none() {
        let n = 4;
        let mut index = None;
        for _ in 0..n + 1 {
            index = cycle_index(index, 1, n);
        }
        assert_eq!(index, None);
        assert_eq!(cycle_index(None, -1, n), Some(3));
        assert_eq!(cycle_index(Some(0), -1, n), None);
        assert_eq!(cycle_index(None, 1, 0), None);
    }

    #[test]
    fn test_refilter_narrows_and_clamps() {
        let source = opts(&["alpha", "alps", "beta"]);
        let mut state = SuggestionState::new();
        state.refilter(&source, None, "");
        state.index = Some(2);
        state.refilter(&source, Some(""), "al");
        assert_eq!(state.options, Some(opts(&["alpha", "alps"])));
        assert_eq!(state.index, Some(1));
        state.refilter(&source, Some("al"), "alph");
        assert_eq!(state.options, Some(opts(&["alpha"])));
        assert_eq!(state.index, Some(0));
        // Shortening rescans the full source
        state.refilter(&source, Some("alph"), "b");
        assert_eq!(state.options, Some(opts(&["beta"])));
    }

    #[test]
    fn test_tab_with_single_option_commits() {
        let mut state = SuggestionState::new();
        state.refilter(&opts(&["only"]), None, "o");
        state.show();
        assert_eq!(state.on_key(Key::Tab), KeyAction::Commit);
        assert_eq!(state.selected(), Some("only"));
    }

    #[test]
    fn test_tab_with_many_options_advances() {
        let mut state = SuggestionState::new();
        state.refilter(&opts(&["one", "two"]), None, "");
        state.show();
        assert_eq!(state.on_key(Key::Tab), KeyAction::Moved);
        assert_eq!(state.selected(), Some("one"));
        assert_eq!(state.on_key(Key::Tab), KeyAction::Moved);
        assert_eq!(state.selected(), Some("two"));
    }

    #[test]
    fn test_enter_commits_only_with_highlight() {
        let mut state = SuggestionState::new();
        state.refilter(&opts(&["one", "two"]), None, "");
        state.show();
        assert_eq!(state.on_key(Key::Enter), KeyAction::Ignored);
        state.on_key(Key::ArrowUp);
        assert_eq!(state.selected(), Some("two"));
        assert_eq!(state.on_key(Key::Enter), KeyAction::Commit);
    }

    #[test]
    fn test_hidden_list_ignores_keys() {
        let mut state = SuggestionState::new();
        state.refilter(&opts(&["one"]), None, "");
        state.show();
        state.hide();
        assert_eq!(state.on_key(Key::ArrowDown), KeyAction::Ignored);
        assert_eq!(state.index, None);
    }

    #[test]
    fn test_option_source_loads_once() {
        let mut source = OptionSource::default();
        assert!(source.begin_load());
        assert!(!source.begin_load());
        source.finish(opts(&["a"]));
        assert!(!source.begin_load());
        assert_eq!(source.options(), opts(&["a"]).as_slice());
    }

    #[test]
    fn test_value_assist_complete() {
        let mut assist = ValueAssist::new("");
        assert!(assist.source.begin_load());
        assist.receive(opts(&["Resistor", "Relay", "Capacitor"]));
        assist.set_value("rel");
        assert_eq!(assist.suggestions.options, Some(opts(&["Relay"])));
        assert!(!assist.complete());
        assist.suggestions.on_key(Key::Tab);
        assert!(assist.complete());
        assert_eq!(assist.value(), "Relay");
        assert!(!assist.suggestions.visible);
        // Completing to the same text is a no-op
        assist.suggestions.show();
        assist.suggestions.index = Some(0);
        assert!(!assist.complete());
    }

    #[test]
    fn test_options_arriving_do_not_open_the_list() {
        let mut assist = ValueAssist::new("Re");
        assert!(assist.source.begin_load());
        assist.receive(opts(&["Resistor", "Relay"]));
        assert!(!assist.suggestions.shows_dropdown());

        // Focused: shown once data is there, gone again on blur
        assist.suggestions.show();
        assert!(assist.suggestions.shows_dropdown());
        assist.suggestions.hide();
        assist.set_value("Rel");
        assert!(assist.suggestions.shows_dropdown());
        assist.suggestions.hide();
        assist.receive(opts(&["Relay"]));
        assert!(!assist.suggestions.shows_dropdown());
    }

    #[test]
    fn test_loading_while_focused_shows_results() {
        let mut assist = ValueAssist::new("");
        assist.suggestions.show();
        assert!(!assist.suggestions.shows_dropdown());
        assist.receive(opts(&["Capacitor"]));
        assert!(assist.suggestions.shows_dropdown());
    }
}
