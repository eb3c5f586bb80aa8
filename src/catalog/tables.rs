// SPDX-License-Identifier: PMPL-1.0-or-later
//! Static Trusted Tester 5.1.3 tables.

use super::{TestDefinition, WcagCriterion};
use crate::model::{TestId, WcagLevel};

/// Tests whose failure blocks any conformance claim
pub const CRITICAL_TESTS: [TestId; 3] = [TestId::new(3, 'A'), TestId::new(4, 'C'), TestId::new(8, 'A')];

pub(super) const CATEGORIES: [(u8, &str); 20] = [
    (1, "Conforming Alternate Version"),
    (2, "Auto-Playing and Auto-Updating Content"),
    (3, "Flashing Content"),
    (4, "Keyboard Access and Focus"),
    (5, "Forms"),
    (6, "Links and Buttons"),
    (7, "Images"),
    (8, "Timing"),
    (9, "Repetitive Content"),
    (10, "Content Structure"),
    (11, "Language"),
    (12, "Page Titles and Frames"),
    (13, "Sensory Characteristics and Contrast"),
    (14, "Tables"),
    (15, "CSS Content and Positioning"),
    (16, "Audio-Only and Video-Only"),
    (17, "Synchronized Media"),
    (18, "Resize Text"),
    (19, "Multiple Ways"),
    (20, "Parsing"),
];

pub(super) const BASELINES: [(&str, &str); 24] = [
    ("1", "Keyboard Access"),
    ("2", "Focus"),
    ("3", "Non-Interference"),
    ("4", "Repetitive Content"),
    ("5", "Changing Content"),
    ("6", "Images"),
    ("7", "Sensory Characteristics"),
    ("8", "Contrast"),
    ("9", "Flashing"),
    ("10", "Forms"),
    ("11", "Page Titles"),
    ("12", "Frames"),
    ("13", "Content Structure"),
    ("14", "Links"),
    ("15", "Language"),
    ("16", "Audio-Only and Video-Only"),
    ("17", "Synchronized Media"),
    ("18", "CSS Positioning"),
    ("19", "Timing"),
    ("20", "Conforming Alternate Version"),
    ("21", "Character Key Shortcuts"),
    ("22", "Resize Text"),
    ("23", "Multiple Ways"),
    ("24", "Parsing"),
];

const fn sc(id: &'static str, name: &'static str, level: WcagLevel, principle: &'static str) -> WcagCriterion {
    WcagCriterion {
        id,
        name,
        level,
        principle,
    }
}

const P: &str = "Perceivable";
const O: &str = "Operable";
const U: &str = "Understandable";
const R: &str = "Robust";

pub(super) const WCAG_CRITERIA: [WcagCriterion; 46] = [
    sc("CR1", "Conforming Alternate Version", WcagLevel::A, "Conformance"),
    sc("1.1.1", "Non-text Content", WcagLevel::A, P),
    sc("1.2.1", "Audio-only and Video-only (Prerecorded)", WcagLevel::A, P),
    sc("1.2.2", "Captions (Prerecorded)", WcagLevel::A, P),
    sc("1.2.3", "Audio Description or Media Alternative (Prerecorded)", WcagLevel::A, P),
    sc("1.2.4", "Captions (Live)", WcagLevel::AA, P),
    sc("1.2.5", "Audio Description (Prerecorded)", WcagLevel::AA, P),
    sc("1.3.1", "Info and Relationships", WcagLevel::A, P),
    sc("1.3.2", "Meaningful Sequence", WcagLevel::A, P),
    sc("1.3.3", "Sensory Characteristics", WcagLevel::A, P),
    sc("1.3.4", "Orientation", WcagLevel::AA, P),
    sc("1.3.5", "Identify Input Purpose", WcagLevel::AA, P),
    sc("1.4.1", "Use of Color", WcagLevel::A, P),
    sc("1.4.2", "Audio Control", WcagLevel::A, P),
    sc("1.4.3", "Contrast (Minimum)", WcagLevel::AA, P),
    sc("1.4.4", "Resize Text", WcagLevel::AA, P),
    sc("1.4.5", "Images of Text", WcagLevel::AA, P),
    sc("1.4.10", "Reflow", WcagLevel::AA, P),
    sc("1.4.11", "Non-text Contrast", WcagLevel::AA, P),
    sc("1.4.12", "Text Spacing", WcagLevel::AA, P),
    sc("1.4.13", "Content on Hover or Focus", WcagLevel::AA, P),
    sc("2.1.1", "Keyboard", WcagLevel::A, O),
    sc("2.1.2", "No Keyboard Trap", WcagLevel::A, O),
    sc("2.1.4", "Character Key Shortcuts", WcagLevel::A, O),
    sc("2.2.1", "Timing Adjustable", WcagLevel::A, O),
    sc("2.2.2", "Pause, Stop, Hide", WcagLevel::A, O),
    sc("2.3.1", "Three Flashes or Below Threshold", WcagLevel::A, O),
    sc("2.4.1", "Bypass Blocks", WcagLevel::A, O),
    sc("2.4.2", "Page Titled", WcagLevel::A, O),
    sc("2.4.3", "Focus Order", WcagLevel::A, O),
    sc("2.4.4", "Link Purpose (In Context)", WcagLevel::A, O),
    sc("2.4.5", "Multiple Ways", WcagLevel::AA, O),
    sc("2.4.6", "Headings and Labels", WcagLevel::AA, O),
    sc("2.4.7", "Focus Visible", WcagLevel::AA, O),
    sc("3.1.1", "Language of Page", WcagLevel::A, U),
    sc("3.1.2", "Language of Parts", WcagLevel::AA, U),
    sc("3.2.1", "On Focus", WcagLevel::A, U),
    sc("3.2.2", "On Input", WcagLevel::A, U),
    sc("3.2.3", "Consistent Navigation", WcagLevel::AA, U),
    sc("3.2.4", "Consistent Identification", WcagLevel::AA, U),
    sc("3.3.1", "Error Identification", WcagLevel::A, U),
    sc("3.3.2", "Labels or Instructions", WcagLevel::A, U),
    sc("3.3.3", "Error Suggestion", WcagLevel::AA, U),
    sc("3.3.4", "Error Prevention (Legal, Financial, Data)", WcagLevel::AA, U),
    sc("4.1.1", "Parsing", WcagLevel::A, R),
    sc("4.1.2", "Name, Role, Value", WcagLevel::A, R),
];

#[allow(clippy::too_many_arguments)]
const fn t(
    category: u8,
    letter: char,
    title: &'static str,
    wcag: &'static [&'static str],
    baseline: &'static str,
    pass_condition: &'static str,
    fail_condition: &'static str,
    not_applicable: Option<&'static str>,
) -> TestDefinition {
    TestDefinition {
        id: TestId::new(category, letter),
        title,
        wcag,
        baseline,
        pass_condition,
        fail_condition,
        not_applicable,
        critical: false,
    }
}

const fn critical(mut def: TestDefinition) -> TestDefinition {
    def.critical = true;
    def
}

#[rustfmt::skip]
pub(super) static TESTS: [TestDefinition; 62] = [
    t(1, 'A', "Alternate Version Conformant", &["CR1"], "20",
        "The alternate version passes every applicable test",
        "The alternate version fails at least one applicable test",
        Some("No alternate version is provided")),
    t(1, 'B', "Alternate Version Reachable", &["CR1"], "20",
        "The alternate version can be reached from the non-conforming page",
        "There is no accessible way to reach the alternate version",
        Some("No alternate version is provided")),
    t(1, 'C', "Alternate Version Equivalent", &["CR1"], "20",
        "The alternate version provides the same information and functionality",
        "Information or functionality is missing from the alternate version",
        Some("No alternate version is provided")),
    t(1, 'D', "Alternate Version Up To Date", &["CR1"], "20",
        "The alternate version is as current as the non-conforming page",
        "The alternate version is out of date",
        Some("No alternate version is provided")),
    t(2, 'A', "Audio Control", &["1.4.2"], "5",
        "Auto-playing audio stops within 3 seconds or can be paused, stopped or muted",
        "Auto-playing audio longer than 3 seconds cannot be controlled",
        Some("No audio plays automatically")),
    t(2, 'B', "Pause, Stop, Hide", &["2.2.2"], "5",
        "Moving, blinking, scrolling or auto-updating content can be paused, stopped or hidden",
        "Moving content cannot be paused, stopped or hidden",
        Some("No moving, blinking, scrolling or auto-updating content")),
    critical(t(3, 'A', "Three Flashes", &["2.3.1"], "9",
        "Content does not flash more than three times in any one second period",
        "Content flashes more than three times per second above the flash thresholds",
        Some("No flashing content"))),
    t(4, 'A', "Keyboard Access", &["2.1.1"], "1",
        "All interactive elements are operable through the keyboard",
        "An interactive element cannot be reached or operated with the keyboard",
        Some("No interactive elements")),
    t(4, 'B', "Keyboard Access to User Controls", &["2.1.1"], "1",
        "All user controls are keyboard accessible",
        "A user control is not keyboard accessible",
        Some("No user controls")),
    critical(t(4, 'C', "No Keyboard Trap", &["2.1.2"], "3",
        "Keyboard focus can always be moved away from every component",
        "Keyboard focus becomes trapped in a component",
        Some("No focusable elements"))),
    t(4, 'D', "Focus Visible", &["2.4.7"], "2",
        "Every focusable element shows a visible focus indicator",
        "A focusable element has no visible focus indicator",
        Some("No focusable elements")),
    t(4, 'E', "On Focus", &["3.2.1"], "2",
        "Receiving focus does not initiate a change of context",
        "Receiving focus initiates a change of context",
        Some("No focusable elements")),
    t(4, 'F', "Focus Order", &["2.4.3"], "2",
        "Focus order preserves meaning and operability",
        "Focus order is not logical",
        Some("No focusable elements")),
    t(4, 'G', "Character Key Shortcuts", &["2.1.4"], "21",
        "Single character shortcuts can be turned off or remapped",
        "A single character shortcut cannot be turned off or remapped",
        Some("No single character key shortcuts")),
    t(5, 'A', "Labels or Instructions", &["3.3.2"], "10",
        "Every form field has a visual label or instructions",
        "A form field has no visual label or instructions",
        Some("No form fields")),
    t(5, 'B', "Labels Descriptive", &["2.4.6"], "10",
        "Form labels describe the purpose of their fields",
        "A form label does not describe its field",
        Some("No form fields")),
    t(5, 'C', "Programmatic Labels", &["1.3.1", "4.1.2"], "10",
        "Every form field has a programmatically associated label",
        "A form field has no programmatically associated label",
        Some("No form fields")),
    t(5, 'D', "On Input", &["3.2.2"], "10",
        "Changing a form setting does not cause an unexpected change of context",
        "Changing a form setting causes an unexpected change of context",
        Some("No form fields")),
    t(5, 'E', "Form Name, Role, State", &["4.1.2"], "10",
        "Every form field exposes its name, role and state",
        "A form field does not expose its name, role or state",
        Some("No form fields")),
    t(5, 'F', "Error Identification", &["3.3.1"], "10",
        "Input errors are identified and described in text",
        "An input error is not identified in text",
        Some("No error conditions")),
    t(5, 'G', "Error Suggestion", &["3.3.3"], "10",
        "Suggestions for correcting detected errors are provided",
        "No correction suggestion is provided for a detected error",
        Some("No detectable input errors")),
    t(5, 'H', "Error Prevention (Legal, Financial, Data)", &["3.3.4"], "10",
        "Submissions are reversible, checked or confirmed",
        "A legal, financial or data submission cannot be reversed, checked or confirmed",
        Some("No legal commitments, financial transactions or data modifications")),
    t(5, 'I', "Identify Input Purpose", &["1.3.5"], "10",
        "Fields collecting user information carry valid autocomplete values",
        "A field collecting user information has a missing or invalid autocomplete value",
        Some("No fields collecting information about the user")),
    t(6, 'A', "Link Purpose", &["2.4.4"], "14",
        "The purpose of every link can be determined from its text or context",
        "A link purpose cannot be determined",
        Some("No links")),
    t(6, 'B', "Button Purpose", &["2.4.4", "4.1.2"], "14",
        "Every button has an accessible name describing its purpose",
        "A button has no accessible name",
        Some("No buttons")),
    t(7, 'A', "Meaningful Images", &["1.1.1"], "6",
        "Every meaningful image has an equivalent text alternative",
        "A meaningful image has no or a non-descriptive text alternative",
        Some("No meaningful images")),
    t(7, 'B', "Decorative Images", &["1.1.1"], "6",
        "Decorative images are hidden from assistive technology",
        "A decorative image has a text alternative or receives focus",
        Some("No decorative images")),
    t(7, 'C', "CAPTCHA", &["1.1.1"], "6",
        "A CAPTCHA offers an alternative form using another sense",
        "A CAPTCHA has no alternative form",
        Some("No CAPTCHA")),
    t(7, 'D', "Images of Text", &["1.4.5"], "6",
        "Images of text are essential or customizable",
        "An image of text is neither essential nor customizable",
        Some("No images of text")),
    t(7, 'E', "Functional Images", &["4.1.2"], "6",
        "Functional images expose role, name and state",
        "A functional image is missing its role, name or state",
        Some("No functional images")),
    critical(t(8, 'A', "Timing Adjustable", &["2.2.1"], "19",
        "Every time limit can be turned off, adjusted or extended",
        "A time limit cannot be turned off, adjusted or extended",
        Some("No time limits"))),
    t(9, 'A', "Bypass Blocks", &["2.4.1"], "4",
        "A mechanism is available to bypass repeated blocks of content",
        "Repeated content cannot be bypassed",
        Some("No repetitive content")),
    t(9, 'B', "Consistent Navigation", &["3.2.3", "3.2.4"], "4",
        "Repeated navigation appears in the same relative order",
        "Repeated navigation changes order between pages",
        Some("No repetitive content")),
    t(9, 'C', "Skip Link Target", &["2.4.1"], "4",
        "Every skip link has an existing target and is visible on focus",
        "A skip link has no target or stays hidden on focus",
        Some("No skip links")),
    t(10, 'A', "Heading Purpose", &["2.4.6"], "13",
        "Headings describe the topic or purpose of their section",
        "A heading is empty or not descriptive",
        Some("No headings")),
    t(10, 'B', "Visual Headings Programmatic", &["1.3.1"], "13",
        "Text styled as a heading is marked up as a heading",
        "A visual heading is not programmatically a heading",
        Some("No visual headings")),
    t(10, 'C', "Heading Levels", &["1.3.1"], "13",
        "Heading levels follow the content hierarchy without skipping",
        "A heading skips one or more levels",
        Some("No headings")),
    t(10, 'D', "List Structure", &["1.3.1"], "13",
        "Visual lists are marked up as semantic lists",
        "A visual list is not marked up as a list",
        Some("No visual lists")),
    t(11, 'A', "Page Language", &["3.1.1"], "15",
        "The default human language of the page is programmatically set and valid",
        "The page language is missing or invalid",
        None),
    t(11, 'B', "Language of Parts", &["3.1.2"], "15",
        "Passages in another language carry a valid lang attribute",
        "A foreign-language passage has no or an invalid lang attribute",
        Some("No foreign-language passages")),
    t(12, 'A', "Page Title Present", &["2.4.2"], "11",
        "The page has exactly one non-empty title",
        "The page title is missing, empty or duplicated",
        None),
    t(12, 'B', "Page Title Descriptive", &["2.4.2"], "11",
        "The page title describes the topic or purpose of the page",
        "The page title is not descriptive",
        None),
    t(12, 'C', "Frame Titles", &["4.1.2"], "12",
        "Every frame has a non-empty title",
        "A frame has no title",
        Some("No frames")),
    t(12, 'D', "iFrame Titles", &["4.1.2"], "12",
        "Every iframe has a descriptive title",
        "An iframe has a missing or non-descriptive title",
        Some("No iframes")),
    t(13, 'A', "Sensory Characteristics", &["1.3.3"], "7",
        "Instructions do not rely solely on sensory characteristics",
        "An instruction relies solely on shape, size, location or sound",
        Some("No instructions referring to sensory characteristics")),
    t(13, 'B', "Use of Color", &["1.4.1"], "7",
        "Color is not the only means of conveying information",
        "Information is conveyed by color alone",
        Some("Color is not used to convey information")),
    t(13, 'C', "Text Contrast", &["1.4.3"], "8",
        "Text has a contrast ratio of at least 4.5:1 (3:1 for large text)",
        "Text contrast is below the required ratio",
        Some("No text")),
    t(13, 'D', "Non-text Contrast", &["1.4.11"], "8",
        "UI components and graphical objects have a contrast ratio of at least 3:1",
        "A UI component or graphical object has contrast below 3:1",
        Some("No UI components or graphical objects")),
    t(14, 'A', "Data Table Headers", &["1.3.1"], "13",
        "Data tables have properly marked header cells",
        "A data table has missing or improperly marked headers",
        Some("No data tables")),
    t(14, 'B', "Data Table Associations", &["1.3.1"], "13",
        "Complex data tables associate every data cell with its headers",
        "A complex data table has incomplete header associations",
        Some("No complex data tables")),
    t(14, 'C', "Layout Tables", &["1.3.1"], "13",
        "Layout tables carry no data table markup",
        "A layout table uses th, caption or other data table markup",
        Some("No layout tables")),
    t(15, 'A', "CSS Positioning", &["1.3.2"], "18",
        "Reading order is preserved when CSS positioning is removed",
        "Removing CSS positioning changes the meaning of the content",
        Some("No CSS-positioned content")),
    t(15, 'B', "CSS Content", &["1.3.1"], "18",
        "Meaningful CSS-generated content is also available in the page",
        "Meaningful content exists only in CSS",
        Some("No CSS-generated content")),
    t(16, 'A', "Audio-only Alternative", &["1.2.1"], "16",
        "Prerecorded audio-only content has a transcript",
        "Prerecorded audio-only content has no transcript",
        Some("No prerecorded audio-only content")),
    t(16, 'B', "Video-only Alternative", &["1.2.1"], "16",
        "Prerecorded video-only content has a text or audio alternative",
        "Prerecorded video-only content has no alternative",
        Some("No prerecorded video-only content")),
    t(17, 'A', "Captions (Prerecorded)", &["1.2.2"], "17",
        "Prerecorded synchronized media has accurate captions",
        "Prerecorded synchronized media has missing or inaccurate captions",
        Some("No prerecorded synchronized media")),
    t(17, 'B', "Audio Description or Alternative", &["1.2.3"], "17",
        "Prerecorded synchronized media has audio description or a media alternative",
        "Prerecorded synchronized media has neither audio description nor an alternative",
        Some("No prerecorded synchronized media")),
    t(17, 'C', "Captions (Live)", &["1.2.4"], "17",
        "Live synchronized media has captions",
        "Live synchronized media has no captions",
        Some("No live synchronized media")),
    t(17, 'D', "Audio Description (Prerecorded)", &["1.2.5"], "17",
        "Prerecorded synchronized media has audio description",
        "Prerecorded synchronized media has no audio description",
        Some("No prerecorded synchronized media")),
    t(18, 'A', "Resize Text", &["1.4.4"], "22",
        "Text resizes to 200% without loss of content or functionality",
        "Content or functionality is lost when text is resized to 200%",
        Some("No text")),
    t(19, 'A', "Multiple Ways", &["2.4.5"], "23",
        "More than one way is available to locate the page within a set",
        "Only one way is available to locate the page",
        Some("Page is not part of a set or is a step in a process")),
    t(20, 'A', "Parsing", &["4.1.1"], "24",
        "Markup has no parsing errors affecting assistive technology",
        "Markup has parsing errors such as duplicate ids or unclosed elements",
        None),
];
