//! Tests for the HTML and stylesheet renderers

use serde_json::json;

use bemtools::application::render::{
    HtmlRenderer, RenderOptions, Renderer, StyleRenderer, StyleSyntax,
};
use bemtools::domain::BemNode;

fn menu() -> BemNode {
    BemNode::from_value(json!({
        "block": "menu",
        "tag": "ul",
        "mods": {"main": true},
        "content": [
            {"elem": "item", "tag": "li", "elemMods": {"active": true}, "content": "Home"},
            {"elem": "item", "tag": "li", "content": "About"}
        ]
    }))
    .unwrap()
}

#[test]
fn given_block_with_elems_when_rendering_html_then_bem_classes_and_indentation() {
    // Act
    let html = HtmlRenderer::new(RenderOptions::default())
        .render(&menu())
        .unwrap();

    // Assert
    assert_eq!(
        html,
        "<ul class=\"menu menu--main\">\n  \
         <li class=\"menu__item menu__item--active\">Home</li>\n  \
         <li class=\"menu__item\">About</li>\n\
         </ul>\n"
    );
}

#[test]
fn given_attrs_void_tag_and_markup_text_when_rendering_html_then_escaped() {
    // Arrange
    let node = BemNode::from_value(json!({
        "block": "form",
        "tag": "form",
        "attrs": {"action": "/send?a=1&b=2"},
        "content": [
            "Fish & <chips>",
            {"elem": "input", "tag": "input", "attrs": {"required": true}},
            {"block": "button", "mods": {"size": "s"}, "cls": "js-send", "content": []}
        ]
    }))
    .unwrap();

    // Act
    let html = HtmlRenderer::new(RenderOptions::default()).render(&node).unwrap();

    // Assert
    let lines: Vec<&str> = html.lines().collect();
    assert_eq!(lines[0], "<form class=\"form\" action=\"/send?a=1&amp;b=2\">");
    assert_eq!(lines[1], "  Fish &amp; &lt;chips&gt;");
    assert_eq!(lines[2], "  <input class=\"form__input\" required>");
    assert_eq!(
        lines[3],
        "  <div class=\"button button--size_s js-send\"></div>"
    );
    assert_eq!(lines[4], "</form>");
}

#[test]
fn given_custom_separators_when_rendering_html_then_used_in_classes() {
    // Arrange
    let options = RenderOptions {
        mod_separator: "_".to_string(),
        elem_separator: "-".to_string(),
        indent: "\t".to_string(),
    };

    // Act
    let html = HtmlRenderer::new(options).render(&menu()).unwrap();

    // Assert
    assert!(html.starts_with("<ul class=\"menu menu_main\">\n\t<li class=\"menu-item menu-item_active\">"));
}

#[test]
fn given_block_with_elems_when_rendering_scss_then_nested_rules() {
    // Act
    let scss = StyleRenderer::new(StyleSyntax::Scss, RenderOptions::default())
        .render(&menu())
        .unwrap();

    // Assert
    assert_eq!(
        scss,
        ".menu {\n  &--main {\n  }\n  &__item {\n    &--active {\n    }\n  }\n}\n"
    );
}

#[test]
fn given_block_with_elems_when_rendering_css_then_flat_selectors() {
    // Act
    let css = StyleRenderer::new(StyleSyntax::Css, RenderOptions::default())
        .render(&menu())
        .unwrap();

    // Assert
    assert_eq!(
        css,
        ".menu {\n}\n\n.menu--main {\n}\n\n.menu__item {\n}\n\n.menu__item--active {\n}\n"
    );
}

#[test]
fn given_nested_blocks_when_rendering_scss_then_one_rule_per_block_in_order() {
    // Arrange
    let node = BemNode::from_value(json!({
        "block": "page",
        "content": [
            {"block": "link", "mods": {"size": "s"}},
            {"elem": "footer", "content": [{"block": "link", "mods": {"theme": "dark"}}]},
            {"elem": "footer"}
        ]
    }))
    .unwrap();

    // Act
    let scss = StyleRenderer::new(StyleSyntax::Scss, RenderOptions::default())
        .render(&node)
        .unwrap();

    // Assert
    assert_eq!(
        scss,
        ".page {\n  &__footer {\n  }\n}\n\n\
         .link {\n  &--size_s {\n  }\n  &--theme_dark {\n  }\n}\n"
    );
}

#[test]
fn given_node_without_bem_names_when_rendering_styles_then_empty_output() {
    // Arrange
    let node = BemNode::from_value(json!({"tag": "div", "content": "plain"})).unwrap();

    // Act
    let css = StyleRenderer::new(StyleSyntax::Css, RenderOptions::default())
        .render(&node)
        .unwrap();

    // Assert
    assert!(css.is_empty());
}
