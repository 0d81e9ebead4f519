//! Tests for ConversionService and its converter table

use std::sync::Arc;

use rstest::rstest;
use serde_json::{json, Value};

use bemtools::application::services::{
    ConversionRequest, ConversionService, ConverterTable, TOO_MANY_NODES,
};
use bemtools::application::ApplicationError;
use bemtools::config::Settings;
use bemtools::domain::{ExpansionMode, Format};
use bemtools::infrastructure::di::ServiceContainer;
use bemtools::infrastructure::traits::{NoticeLevel, RealFileSystem, RecordingNotifier};
use bemtools::util::testing;

fn service_with(settings: Settings) -> (ConversionService, Arc<RecordingNotifier>) {
    testing::init_test_setup();
    let notifier = Arc::new(RecordingNotifier::new());
    let service = ConversionService::new(Arc::new(settings), notifier.clone()).unwrap();
    (service, notifier)
}

fn service() -> (ConversionService, Arc<RecordingNotifier>) {
    service_with(Settings::default())
}

fn request(from: Option<Format>, to: Option<Format>) -> ConversionRequest {
    ConversionRequest { from, to }
}

#[test]
fn given_shorthand_without_target_when_converting_then_html_and_info_notice() {
    // Arrange
    let (service, notifier) = service();

    // Act
    let conversion = service
        .convert("ul.menu\n  li.item*2 Home", ConversionRequest::default())
        .unwrap();

    // Assert
    assert_eq!(conversion.from, Format::Pseudocode);
    assert_eq!(conversion.to, Format::Html);
    assert_eq!(
        conversion.output,
        "<ul class=\"menu\">\n  <li class=\"menu__item\">Home</li>\n  <li class=\"menu__item\">Home</li>\n</ul>\n"
    );
    assert_eq!(
        notifier.messages(NoticeLevel::Info),
        vec!["HTML code has been generated.".to_string()]
    );
    assert!(notifier.messages(NoticeLevel::Error).is_empty());
}

#[test]
fn given_shorthand_when_converting_to_json_then_clean_bemjson() {
    // Arrange
    let (service, _) = service();

    // Act
    let conversion = service
        .convert("div.page\n  span.title Hello", request(None, Some(Format::Json)))
        .unwrap();

    // Assert
    let value: Value = serde_json::from_str(&conversion.output).unwrap();
    assert_eq!(
        value,
        json!({
            "block": "page",
            "tag": "div",
            "content": [{"elem": "title", "tag": "span", "content": "Hello"}]
        })
    );
    assert!(!conversion.output.contains("_depth"));
}

#[test]
fn given_text_on_line_with_children_when_converting_to_json_then_children_replace_text() {
    // Arrange
    let (service, _) = service();

    // Act
    let conversion = service
        .convert("page Title\n  body", request(None, Some(Format::Json)))
        .unwrap();

    // Assert
    let value: Value = serde_json::from_str(&conversion.output).unwrap();
    assert_eq!(
        value,
        json!({
            "block": "page",
            "tag": "div",
            "content": [{"elem": "body", "tag": "div", "content": []}]
        })
    );
}

#[test]
fn given_bemjson_when_converting_then_scss_skeleton() {
    // Arrange
    let (service, notifier) = service();
    let text = r#"{"block": "card", "_depth": 0, "content": [{"elem": "title", "mods": {"big": true}}]}"#;

    // Act
    let conversion = service
        .convert(text, request(None, Some(Format::Scss)))
        .unwrap();

    // Assert: block mods on an element were migrated to elemMods
    assert_eq!(conversion.from, Format::Json);
    assert_eq!(
        conversion.output,
        ".card {\n  &__title {\n    &--big {\n    }\n  }\n}\n"
    );
    assert_eq!(
        notifier.messages(NoticeLevel::Info),
        vec!["SCSS code has been generated.".to_string()]
    );
}

#[test]
fn given_html_selection_when_converting_then_unsupported_and_no_output() {
    // Arrange
    let (service, notifier) = service();

    // Act
    let result = service.convert("<div class=\"page\"></div>", ConversionRequest::default());

    // Assert
    assert!(result.is_none());
    assert_eq!(
        notifier.messages(NoticeLevel::Error),
        vec!["Cannot convert HTML to SCSS".to_string()]
    );
    assert!(notifier.messages(NoticeLevel::Info).is_empty());
}

#[rstest]
#[case(Some(Format::Pseudocode), Some(Format::Pseudocode))]
#[case(Some(Format::Json), Some(Format::Json))]
#[case(Some(Format::Scss), Some(Format::Css))]
#[case(Some(Format::Css), None)]
fn given_unregistered_pair_when_converting_then_unsupported_conversion(
    #[case] from: Option<Format>,
    #[case] to: Option<Format>,
) {
    // Arrange
    let (service, _) = service();

    // Act
    let err = service.try_convert("page", request(from, to)).unwrap_err();

    // Assert
    assert!(
        matches!(err, ApplicationError::UnsupportedConversion { .. }),
        "unexpected error: {:?}",
        err
    );
}

#[test]
fn given_blank_selection_when_converting_then_no_selection_notice() {
    // Arrange
    let (service, notifier) = service();

    // Act
    let result = service.convert("  \n ", ConversionRequest::default());

    // Assert
    assert!(result.is_none());
    assert_eq!(
        notifier.messages(NoticeLevel::Error),
        vec!["Please select a valid code.".to_string()]
    );
}

#[test]
fn given_blank_selection_with_explicit_source_when_converting_then_empty_input() {
    let (service, _) = service();

    let err = service
        .try_convert("\n", request(Some(Format::Pseudocode), None))
        .unwrap_err();

    assert_eq!(err.to_string(), "Please select some lines");
}

#[test]
fn given_broken_json_when_converting_then_invalid_json_notice() {
    // Arrange
    let (service, notifier) = service();

    // Act
    let result = service.convert("{\"block\": ", ConversionRequest::default());

    // Assert
    assert!(result.is_none());
    let errors = notifier.messages(NoticeLevel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Cannot convert these lines to a JS Object"));
}

#[test]
fn given_malformed_shorthand_when_converting_then_line_reported() {
    // Arrange
    let (service, notifier) = service();

    // Act
    let result = service.convert("page\n  .oops", ConversionRequest::default());

    // Assert
    assert!(result.is_none());
    let errors = notifier.messages(NoticeLevel::Error);
    assert!(errors[0].contains("line 2"));
    assert!(errors[0].contains(".oops"));
}

#[test]
fn given_expansion_over_node_ceiling_when_converting_then_warning_and_partial_output() {
    // Arrange
    let settings = Settings {
        max_nodes: Some(5),
        ..Settings::default()
    };
    let (service, notifier) = service_with(settings);

    // Act
    let conversion = service
        .convert("list\n  item*10", ConversionRequest::default())
        .unwrap();

    // Assert
    assert_eq!(conversion.output.matches("list__item").count(), 1);
    assert_eq!(
        notifier.messages(NoticeLevel::Warning),
        vec![TOO_MANY_NODES.to_string()]
    );
    assert_eq!(notifier.messages(NoticeLevel::Info).len(), 1);
}

#[test]
fn given_alias_mode_when_converting_then_same_output_as_copy_mode() {
    // Arrange
    let (copy_service, _) = service();
    let (alias_service, _) = service_with(Settings {
        expansion: ExpansionMode::Alias,
        ..Settings::default()
    });
    let text = "table\n  tr*2\n    td*3 x";

    // Act
    let copied = copy_service.convert(text, ConversionRequest::default()).unwrap();
    let aliased = alias_service.convert(text, ConversionRequest::default()).unwrap();

    // Assert
    assert_eq!(copied.output, aliased.output);
    assert_eq!(copied.output.matches("table__td").count(), 6);
}

#[test]
fn given_style_target_with_no_bem_entities_when_converting_then_render_error() {
    // Arrange
    let (service, notifier) = service();

    // Act
    let result = service.convert(r#"{"tag": "p", "content": "hi"}"#, request(None, Some(Format::Css)));

    // Assert
    assert!(result.is_none());
    assert!(notifier.messages(NoticeLevel::Error)[0].starts_with("Cannot convert this code to CSS"));
}

#[test]
fn given_standard_table_when_listing_then_all_source_pairs_present() {
    // Act
    let table = ConverterTable::standard().unwrap();

    // Assert
    assert_eq!(
        table.pairs(),
        vec![
            (Format::Pseudocode, Format::Json),
            (Format::Pseudocode, Format::Html),
            (Format::Pseudocode, Format::Scss),
            (Format::Pseudocode, Format::Css),
            (Format::Json, Format::Html),
            (Format::Json, Format::Scss),
            (Format::Json, Format::Css),
        ]
    );
    assert!(table.get(Format::Html, Format::Scss).is_none());
}

#[test]
fn given_duplicate_registration_when_building_table_then_invalid_table() {
    // Arrange
    let mut table = ConverterTable::new();
    let converter = ConverterTable::standard()
        .unwrap()
        .get(Format::Json, Format::Html)
        .unwrap();
    table.register(Format::Json, Format::Html, converter).unwrap();

    // Act
    let err = table
        .register(Format::Json, Format::Html, converter)
        .unwrap_err();

    // Assert
    assert!(matches!(err, ApplicationError::InvalidConverterTable { .. }));
}

#[test]
fn given_source_without_default_target_converter_when_validating_then_invalid_table() {
    // Arrange
    let converter = ConverterTable::standard()
        .unwrap()
        .get(Format::Json, Format::Css)
        .unwrap();
    let mut table = ConverterTable::new();
    table.register(Format::Json, Format::Css, converter).unwrap();

    // Act
    let err = table.validate().unwrap_err();

    // Assert
    assert!(matches!(err, ApplicationError::InvalidConverterTable { .. }));
}

#[test]
fn given_container_with_recording_notifier_when_converting_then_notices_recorded() {
    // Arrange
    testing::init_test_setup();
    let notifier = Arc::new(RecordingNotifier::new());
    let container = ServiceContainer::with_deps(
        Settings::default(),
        Arc::new(RealFileSystem),
        notifier.clone(),
    )
    .unwrap();

    // Act
    let conversion = container
        .conversion
        .convert("nav\n  a.link Home", request(None, Some(Format::Css)));

    // Assert
    assert_eq!(
        conversion.map(|c| c.output),
        Some(".nav {\n}\n\n.nav__link {\n}\n".to_string())
    );
    assert_eq!(notifier.notices().len(), 1);
}
