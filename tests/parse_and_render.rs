use obsidian_markdown::prelude::*;

const DOCUMENT: &str = "---
title: Test
tags: [a, b, c]
draft: false
---

# Title

Some **bold** and *italic* text with [[Another Page|custom text]] and `code`.

> [!warning]- Collapsed
> Hidden [[Secret#Part]]

| Left | Center | Right |
|:-----|:------:|------:|
| 1 | 2 | 3 |
| 4 | 5 | 6 |

- [x] done
- [ ] open
  1. nested ==mark==

```rust
let x = **not bold**;
```

---

<div>raw *html*</div>
";

fn paragraph(result: &ParseResult) -> &[InlineToken] {
    match result.tokens.first() {
        Some(BlockToken::Paragraph { children }) => children,
        other => panic!("expected paragraph: {other:?}"),
    }
}

#[cfg_attr(feature = "tracing", tracing_test::traced_test)]
#[test]
fn frontmatter_only_when_delimited() {
    for text in ["Body", "title: Test", "# --- not frontmatter", "text\n---\ntitle: x\n---"] {
        assert!(parse(text).frontmatter.is_empty(), "{text:?}");
    }

    let result = parse("---\ntitle: Test\ntags: [a, b, c]\n---\n\nBody");

    assert_eq!(result.frontmatter["title"], "Test");
    assert_eq!(result.frontmatter["tags"], FrontMatterValue::from(vec!["a", "b", "c"]));
    assert_eq!(result.tokens, parse("Body").tokens);
}

#[cfg_attr(feature = "tracing", tracing_test::traced_test)]
#[test]
fn heading_levels() {
    let result = parse("# H1\n## H2\n### H3\n#### H4\n##### H5\n###### H6");

    let levels: Vec<_> = result
        .tokens
        .iter()
        .map(|token| match token {
            BlockToken::Heading(heading) => heading.level,
            other => panic!("expected heading: {other:?}"),
        })
        .collect();

    assert_eq!(levels, vec![1, 2, 3, 4, 5, 6]);
}

#[cfg_attr(feature = "tracing", tracing_test::traced_test)]
#[test]
fn bold_paragraph() {
    let result = parse("This is **bold** text");

    assert!(paragraph(&result).contains(&InlineToken::Bold {
        children: vec![InlineToken::text("bold")]
    }));
}

#[cfg_attr(feature = "tracing", tracing_test::traced_test)]
#[test]
fn wikilink_with_display() {
    let result = parse("Link to [[Another Page|custom text]]");

    assert!(paragraph(&result).contains(&InlineToken::WikiLink(WikiLink {
        target: "Another Page".to_string(),
        display: Some("custom text".to_string()),
    })));
}

#[cfg_attr(feature = "tracing", tracing_test::traced_test)]
#[test]
fn collapsed_callout() {
    let result = parse("> [!warning]- Collapsed\n> Hidden");

    let [BlockToken::Callout(callout)] = result.tokens.as_slice() else {
        panic!("expected one callout: {result:?}");
    };

    assert_eq!(callout.kind, "warning");
    assert_eq!(callout.title.as_deref(), Some("Collapsed"));
    assert!(callout.foldable);
    assert!(callout.collapsed);
    assert_eq!(callout.children, parse("Hidden").tokens);
}

#[cfg_attr(feature = "tracing", tracing_test::traced_test)]
#[test]
fn aligned_table() {
    let result = parse("| a | b |\n|:--|:-:|\n| 1 | 2 |\n| 3 | 4 |");

    let [BlockToken::Table(table)] = result.tokens.as_slice() else {
        panic!("expected one table: {result:?}");
    };

    let header_align: Vec<_> = table.header.iter().map(|cell| cell.align).collect();
    assert_eq!(header_align, vec![Some(Alignment::Left), Some(Alignment::Center)]);
    assert_eq!(table.rows.len(), 2);
    assert!(
        table
            .rows
            .iter()
            .all(|row| row[0].align == Some(Alignment::Left) && row[1].align == Some(Alignment::Center))
    );
}

#[cfg_attr(feature = "tracing", tracing_test::traced_test)]
#[test]
fn unterminated_constructs_stay_text() {
    for text in ["**unterminated bold", "`open code", "[[no close", "==half", "[text](no close"] {
        let result = parse(text);

        assert_eq!(paragraph(&result), &[InlineToken::text(text)], "{text:?}");
    }

    let result = parse("```\nnever closed\n# not a heading");
    assert_eq!(
        result.tokens,
        vec![BlockToken::CodeBlock(CodeBlock {
            language: None,
            content: "never closed\n# not a heading".to_string(),
        })]
    );
}

#[cfg_attr(feature = "tracing", tracing_test::traced_test)]
#[test]
fn malformed_links_and_images_parse() {
    let renderer = render::html::renderer(HtmlOptions::default());

    for text in [
        "[a](x \")",
        "![a](x \")",
        "[a](\")",
        "![a]( \")",
        "[a](\"\")",
        "![a](x \"\")",
        "[a](x \"t\" \")",
        "[a](<x \")",
        "![[a](x \")]]",
        "[[a](x \")|b]]",
        "**[a](x \")**",
    ] {
        let result = parse(text);

        assert!(!result.tokens.is_empty(), "{text:?}");
        let _ = render(&result, &renderer);
    }
}

#[cfg_attr(feature = "tracing", tracing_test::traced_test)]
#[test]
fn document_structure() {
    let result = parse(DOCUMENT);

    let kinds: Vec<_> = result
        .tokens
        .iter()
        .map(|token| match token {
            BlockToken::Paragraph { .. } => "paragraph",
            BlockToken::Heading(_) => "heading",
            BlockToken::CodeBlock(_) => "code_block",
            BlockToken::Blockquote { .. } => "blockquote",
            BlockToken::Callout(_) => "callout",
            BlockToken::List(_) => "list",
            BlockToken::Table(_) => "table",
            BlockToken::HorizontalRule => "horizontal_rule",
            BlockToken::Html { .. } => "html",
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            "heading",
            "paragraph",
            "callout",
            "table",
            "list",
            "code_block",
            "horizontal_rule",
            "html"
        ]
    );
    assert_eq!(collect_wikilinks(&result), vec!["Another Page", "Secret#Part"]);
    assert_eq!(collect_tags(&result), vec!["a", "b", "c"]);
}

#[cfg_attr(feature = "tracing", tracing_test::traced_test)]
#[test]
fn plain_text_reparse_keeps_reading_order() {
    let text = "Some **bold** and *italic* with [[Page|a link]] and ==mark==";
    let plain = render::plain_text::to_plain_text(&parse(text));

    assert_eq!(plain, "Some bold and italic with a link and mark");
    assert_eq!(render::plain_text::to_plain_text(&parse(&plain)), plain);
}

#[cfg_attr(feature = "tracing", tracing_test::traced_test)]
#[test]
fn html_rendering_is_deterministic() {
    let renderer = render::html::renderer(HtmlOptions::default());
    let first = render(&parse(DOCUMENT), &renderer);

    for _ in 0..10 {
        assert_eq!(render(&parse(DOCUMENT), &renderer), first);
    }

    assert!(first.contains("<h1>Title</h1>"));
    assert!(first.contains("<a class=\"wikilink\" href=\"/Another%20Page\">custom text</a>"));
    assert!(first.contains("<div>raw *html*</div>"));
    assert!(first.contains("let x = **not bold**;"));
}

#[cfg_attr(feature = "tracing", tracing_test::traced_test)]
#[test]
fn deep_nesting_does_not_overflow() {
    let quotes = format!("{}deep", "> ".repeat(10_000));
    let result = parse(&quotes);
    assert_eq!(result.tokens.len(), 1);

    let lists: String = (0..500).map(|i| format!("{}- item\n", "  ".repeat(i))).collect();
    assert_eq!(parse(&lists).tokens.len(), 1);

    let emphasis = format!("{}x{}", "*_".repeat(200), "_*".repeat(200));
    assert!(!parse(&emphasis).tokens.is_empty());
}

#[cfg_attr(feature = "tracing", tracing_test::traced_test)]
#[test]
fn ast_serializes_with_type_tags() {
    let result = parse("# Title\n\n- [x] [[Page]]");
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["tokens"][0]["type"], "heading");
    assert_eq!(json["tokens"][1]["type"], "list");
    assert_eq!(
        json["tokens"][1]["items"][0]["children"][0]["children"][0]["type"],
        "wikilink"
    );

    let back: ParseResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, result);
}

#[cfg_attr(feature = "tracing", tracing_test::traced_test)]
#[test]
fn parse_and_render_across_threads() {
    let renderer = render::html::renderer(HtmlOptions::default());
    let expected = render(&parse(DOCUMENT), &renderer);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| render(&parse(DOCUMENT), &renderer)))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
