// SPDX-License-Identifier: PMPL-1.0-or-later
//! Evidence payloads consumed by the category evaluators.
//!
//! Evidence is produced outside this crate by DOM probes or a tester and
//! arrives as `{ "testData": {...}, "elementData": {...} }`. Every signal is
//! optional: an absent field means "not supplied" and is distinct from
//! `false`, and an absent collection is distinct from an empty one (the
//! latter means the page has no such elements).

use serde::{Deserialize, Serialize};

/// One evidence payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Evidence {
    pub test_data: TestData,
    pub element_data: ElementData,
}

impl Evidence {
    pub fn new(test_data: TestData, element_data: ElementData) -> Self {
        Self {
            test_data,
            element_data,
        }
    }
}

/// Scalar and boolean signals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestData {
    // Conforming alternate version
    pub has_alternate_version: Option<bool>,
    pub alternate_passes_all_tests: Option<bool>,
    pub alternate_reachable: Option<bool>,
    pub alternate_equivalent: Option<bool>,
    pub alternate_up_to_date: Option<bool>,

    // Auto-playing and moving content
    pub has_auto_playing_audio: Option<bool>,
    pub auto_audio_stops_within_3s: Option<bool>,
    pub audio_can_be_controlled: Option<bool>,
    pub has_moving_content: Option<bool>,
    pub moving_content_can_be_paused: Option<bool>,

    pub has_flashing_content: Option<bool>,
    pub flashes_below_threshold: Option<bool>,

    // Keyboard and focus
    pub has_user_controls: Option<bool>,
    pub controls_keyboard_accessible: Option<bool>,
    pub context_change_on_focus: Option<bool>,
    pub context_change_details: Option<String>,
    pub focus_order_logical: Option<bool>,
    pub focus_order_issues: Option<String>,
    pub has_single_char_shortcuts: Option<bool>,
    pub shortcuts_can_be_disabled: Option<bool>,
    pub shortcuts_can_be_remapped: Option<bool>,

    // Forms
    pub labels_descriptive: Option<bool>,
    pub non_descriptive_labels: Option<Vec<String>>,
    pub unexpected_change_on_input: Option<bool>,
    pub change_details: Option<String>,
    pub has_error_conditions: Option<bool>,
    #[serde(alias = "errorsIdentifiedProgrammatically")]
    pub errors_identified: Option<bool>,
    pub has_detectable_errors: Option<bool>,
    pub provides_suggestions: Option<bool>,
    pub has_legal_commitments: Option<bool>,
    pub has_reversible_or_reviewable: Option<bool>,

    pub has_captcha: Option<bool>,
    pub captcha_has_alternative: Option<bool>,

    pub has_time_limits: Option<bool>,
    pub time_limit_adjustable: Option<bool>,

    // Repetitive content
    pub has_repetitive_content: Option<bool>,
    pub has_bypass_mechanism: Option<bool>,
    pub navigation_consistent: Option<bool>,

    pub heading_levels_logical: Option<bool>,
    pub heading_level_issues: Option<Vec<String>>,

    pub page_language: Option<String>,

    pub page_title: Option<String>,
    pub title_count: Option<u32>,
    pub title_descriptive: Option<bool>,

    // Sensory characteristics and color
    pub uses_sensory_characteristics: Option<bool>,
    pub sensory_instructions_accessible: Option<bool>,
    pub sensory_only_instructions: Option<Vec<String>>,
    #[serde(alias = "usesColorAlone")]
    pub uses_color_to_convey: Option<bool>,
    pub color_has_alternative: Option<bool>,
    pub color_only_elements: Option<Vec<String>>,

    // CSS
    pub has_css_positioned_content: Option<bool>,
    pub reading_order_preserved: Option<bool>,
    pub has_css_generated_content: Option<bool>,
    pub css_content_conveyed_otherwise: Option<bool>,

    pub has_text: Option<bool>,
    pub text_resizable: Option<bool>,
    pub content_lost_on_resize: Option<bool>,

    pub is_part_of_set: Option<bool>,
    pub is_process_step: Option<bool>,
    pub ways_to_locate: Option<u32>,

    pub parsing_errors: Option<Vec<String>>,
}

/// Element collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementData {
    /// Interactive and focusable elements
    #[serde(alias = "interactiveElements")]
    pub elements: Option<Vec<InteractiveElement>>,
    pub form_fields: Option<Vec<FormField>>,
    pub links: Option<Vec<Link>>,
    pub buttons: Option<Vec<Button>>,
    pub images: Option<Vec<Image>>,
    pub headings: Option<Vec<Heading>>,
    pub visual_headings: Option<Vec<VisualHeading>>,
    pub visual_lists: Option<Vec<VisualList>>,
    pub frames: Option<Vec<Frame>>,
    pub iframes: Option<Vec<Frame>>,
    pub text_elements: Option<Vec<TextElement>>,
    pub ui_components: Option<Vec<NonTextElement>>,
    pub graphical_objects: Option<Vec<NonTextElement>>,
    pub tables: Option<Vec<Table>>,
    pub media: Option<Vec<Media>>,
    pub language_parts: Option<Vec<LanguagePart>>,
    pub skip_links: Option<Vec<SkipLink>>,
    /// Selectors of components that trap keyboard focus
    pub keyboard_traps: Option<Vec<String>>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InteractiveElement {
    pub selector: String,
    pub is_interactive: bool,
    pub focusable: bool,
    pub keyboard_accessible: bool,
    pub has_focus_indicator: bool,
    #[serde(alias = "tabIndex")]
    pub tabindex: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormField {
    pub selector: String,
    pub has_visual_label: bool,
    pub has_instruction: bool,
    pub has_programmatic_label: bool,
    pub has_name: bool,
    pub has_role: bool,
    #[serde(alias = "exposeStates")]
    pub exposes_states: bool,
    pub collects_personal_info: bool,
    pub has_autocomplete: bool,
    pub autocomplete_valid: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Link {
    pub selector: String,
    pub text: String,
    pub aria_label: Option<String>,
    pub title: Option<String>,
    /// Purpose is determinable from the surrounding programmatic context
    pub programmatic_context: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Button {
    pub selector: String,
    pub accessible_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Image {
    pub selector: String,
    pub alt: Option<String>,
    pub has_alt: bool,
    pub alt_descriptive: bool,
    pub is_meaningful: bool,
    pub is_decorative: bool,
    pub focusable: bool,
    /// Image of text
    pub contains_text: bool,
    pub text_image_essential: bool,
    pub text_image_customizable: bool,
    pub is_functional: bool,
    pub is_link: bool,
    pub is_button: bool,
    pub has_role: bool,
    pub has_name: bool,
    pub has_state: bool,
}

impl Default for Image {
    fn default() -> Self {
        Self {
            selector: String::new(),
            alt: None,
            has_alt: false,
            alt_descriptive: true,
            is_meaningful: false,
            is_decorative: false,
            focusable: false,
            contains_text: false,
            text_image_essential: false,
            text_image_customizable: false,
            is_functional: false,
            is_link: false,
            is_button: false,
            has_role: false,
            has_name: false,
            has_state: true,
        }
    }
}

impl Image {
    /// Images inside links or buttons are functional whether flagged or not
    pub fn is_functional(&self) -> bool {
        self.is_functional || self.is_link || self.is_button
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Heading {
    pub selector: String,
    pub level: u8,
    pub text: String,
    pub is_descriptive: bool,
}

impl Default for Heading {
    fn default() -> Self {
        Self {
            selector: String::new(),
            level: 1,
            text: String::new(),
            is_descriptive: default_true(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisualHeading {
    pub selector: String,
    pub text: String,
    pub is_programmatic_heading: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisualList {
    pub selector: String,
    pub is_semantic_list: bool,
    pub has_proper_markup: bool,
}

/// A frame or iframe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Frame {
    pub selector: String,
    pub title: Option<String>,
    pub has_title: bool,
    pub title_descriptive: bool,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            selector: String::new(),
            title: None,
            has_title: false,
            title_descriptive: default_true(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextElement {
    pub selector: String,
    /// Measured ratio; unmeasured elements are skipped
    pub contrast_ratio: Option<f64>,
    pub font_size_pt: Option<f64>,
    pub is_bold: bool,
    /// Explicit override of the size-derived large-text flag
    pub is_large_text: Option<bool>,
    pub is_disabled: bool,
    pub is_decorative: bool,
}

/// Large text is at least 18pt, or 14pt bold
pub const LARGE_TEXT_PT: f64 = 18.0;
pub const LARGE_BOLD_TEXT_PT: f64 = 14.0;

impl TextElement {
    pub fn is_large(&self) -> bool {
        if let Some(flag) = self.is_large_text {
            return flag;
        }
        match self.font_size_pt {
            Some(pt) if pt >= LARGE_TEXT_PT => true,
            Some(pt) => self.is_bold && pt >= LARGE_BOLD_TEXT_PT,
            None => false,
        }
    }
}

/// A UI component or graphical object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NonTextElement {
    pub selector: String,
    pub contrast_ratio: Option<f64>,
    /// Needed to understand the content or identify the component state
    pub is_required: bool,
    pub is_disabled: bool,
}

impl Default for NonTextElement {
    fn default() -> Self {
        Self {
            selector: String::new(),
            contrast_ratio: None,
            is_required: default_true(),
            is_disabled: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Table {
    pub selector: String,
    /// `false` marks a layout table
    pub is_data_table: bool,
    pub is_complex: bool,
    pub has_headers: bool,
    pub headers_properly_marked: bool,
    pub has_header_associations: bool,
    pub associations_complete: bool,
    pub has_data_table_markup: bool,
    #[serde(rename = "hasThElements", alias = "hasTHElements")]
    pub has_th_elements: bool,
    pub has_caption: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MediaKind {
    AudioOnly,
    VideoOnly,
    #[default]
    Synchronized,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Media {
    pub selector: String,
    pub kind: MediaKind,
    pub is_live: bool,
    pub has_transcript: bool,
    pub has_captions: bool,
    pub captions_accurate: Option<bool>,
    pub has_audio_description: bool,
    /// Media that is itself an alternative for text is exempt
    pub is_alternative_for_text: bool,
}

impl Media {
    /// Prerecorded media of the given kind that is not a labelled text alternative
    pub fn is_prerecorded(&self, kind: MediaKind) -> bool {
        self.kind == kind && !self.is_live && !self.is_alternative_for_text
    }

    /// Live synchronized media
    pub fn is_live_synchronized(&self) -> bool {
        self.kind == MediaKind::Synchronized && self.is_live
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguagePart {
    pub selector: String,
    pub lang: Option<String>,
    pub has_lang_attribute: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkipLink {
    pub selector: String,
    pub target_exists: bool,
    pub visible_on_focus: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_and_empty_are_distinct() {
        let absent: Evidence = serde_json::from_value(json!({})).unwrap();
        assert!(absent.element_data.images.is_none());

        let empty: Evidence = serde_json::from_value(json!({ "elementData": { "images": [] } })).unwrap();
        assert_eq!(empty.element_data.images, Some(Vec::new()));
    }

    #[test]
    fn test_false_is_not_absent() {
        let evidence: Evidence = serde_json::from_value(json!({
            "testData": { "hasTimeLimits": false }
        }))
        .unwrap();
        assert_eq!(evidence.test_data.has_time_limits, Some(false));
        assert_eq!(evidence.test_data.time_limit_adjustable, None);
    }

    #[test]
    fn test_legacy_field_aliases() {
        let evidence: Evidence = serde_json::from_value(json!({
            "testData": { "errorsIdentifiedProgrammatically": true, "usesColorAlone": true },
            "elementData": {
                "formFields": [{ "exposeStates": true }],
                "tables": [{ "hasTHElements": true }]
            }
        }))
        .unwrap();
        assert_eq!(evidence.test_data.errors_identified, Some(true));
        assert_eq!(evidence.test_data.uses_color_to_convey, Some(true));
        assert!(evidence.element_data.form_fields.unwrap()[0].exposes_states);
        assert!(evidence.element_data.tables.unwrap()[0].has_th_elements);
    }

    #[test]
    fn test_large_text() {
        let text = |pt: f64, bold: bool| TextElement {
            font_size_pt: Some(pt),
            is_bold: bold,
            ..Default::default()
        };
        assert!(text(18.0, false).is_large());
        assert!(text(14.0, true).is_large());
        assert!(!text(14.0, false).is_large());
        assert!(!text(12.0, true).is_large());

        let overridden = TextElement {
            font_size_pt: Some(10.0),
            is_large_text: Some(true),
            ..Default::default()
        };
        assert!(overridden.is_large());
    }

    #[test]
    fn test_descriptive_defaults() {
        let heading: Heading = serde_json::from_value(json!({ "level": 2, "text": "Intro" })).unwrap();
        assert!(heading.is_descriptive);

        let frame: Frame = serde_json::from_value(json!({ "hasTitle": true })).unwrap();
        assert!(frame.title_descriptive);

        let image: Image = serde_json::from_value(json!({ "isMeaningful": true, "hasAlt": true })).unwrap();
        assert!(image.alt_descriptive);
    }
}
