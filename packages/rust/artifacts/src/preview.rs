//! Static HTML preview: one card per token with logo, swatches, and gradient.

use serde_json::Value;

use tokentint_shared::{
    AVERAGE_COLOR_KEY, Color, ColorTriple, DOMINANT1_COLOR_KEY, DOMINANT2_COLOR_KEY, FieldNames,
    Result, TokenTintError,
};

/// Everything needed to render one token card.
#[derive(Debug, Clone)]
pub struct PreviewCard {
    /// Display symbol (`"?"` when the token has none).
    pub symbol: String,
    /// Logo URI, if the token carries one. Rendered as-is; a broken image
    /// is acceptable.
    pub logo_uri: Option<String>,
    /// Derived colors, absent for tokens that were skipped.
    pub colors: Option<ColorTriple>,
}

/// Human-readable list title: the document's `name` field, if present.
pub fn list_title(document: &Value) -> String {
    document
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("Token List")
        .to_string()
}

/// Build preview cards from an (enriched) token-list document, in list order.
pub fn cards_from_document(document: &Value, fields: &FieldNames) -> Result<Vec<PreviewCard>> {
    let tokens = document
        .get(&fields.tokens_key)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            TokenTintError::validation(format!("no '{}' array in document", fields.tokens_key))
        })?;

    let mut cards = Vec::with_capacity(tokens.len());
    for token in tokens {
        let Some(obj) = token.as_object() else {
            return Err(TokenTintError::validation(
                "token entry is not an object".to_string(),
            ));
        };

        let symbol = obj
            .get(&fields.symbol_key)
            .and_then(Value::as_str)
            .unwrap_or("?")
            .to_string();
        let logo_uri = obj
            .get(&fields.logo_key)
            .and_then(Value::as_str)
            .map(str::to_string);

        let color_at = |key: &str| {
            obj.get(key)
                .and_then(Value::as_str)
                .and_then(|s| Color::parse(s).ok())
        };
        let colors = match (
            color_at(AVERAGE_COLOR_KEY),
            color_at(DOMINANT1_COLOR_KEY),
            color_at(DOMINANT2_COLOR_KEY),
        ) {
            (Some(average), Some(dominant1), Some(dominant2)) => Some(ColorTriple {
                average,
                dominant1,
                dominant2,
            }),
            _ => None,
        };

        cards.push(PreviewCard {
            symbol,
            logo_uri,
            colors,
        });
    }

    Ok(cards)
}

/// Render the self-contained preview document.
pub fn render_preview(title: &str, cards: &[PreviewCard]) -> String {
    let mut body = String::new();

    for card in cards {
        body.push_str("        <article class=\"card\">\n");

        if let Some(uri) = &card.logo_uri {
            body.push_str(&format!(
                "            <img class=\"logo\" src=\"{}\" alt=\"{} logo\">\n",
                escape_html(uri),
                escape_html(&card.symbol)
            ));
        }

        body.push_str(&format!(
            "            <h2>{}</h2>\n",
            escape_html(&card.symbol)
        ));

        if let Some(colors) = &card.colors {
            body.push_str("            <ul class=\"swatches\">\n");
            for (label, color) in [
                ("average", colors.average),
                ("dominant 1", colors.dominant1),
                ("dominant 2", colors.dominant2),
            ] {
                body.push_str(&format!(
                    "                <li><span class=\"chip\" style=\"background:{hex}\"></span>{label} <code>{hex}</code></li>\n",
                    hex = color.to_hex(),
                ));
            }
            body.push_str("            </ul>\n");
            body.push_str(&format!(
                "            <div class=\"gradient\" style=\"background:linear-gradient(135deg, {}, {})\"></div>\n",
                colors.dominant1.to_hex(),
                colors.dominant2.to_hex(),
            ));
        }

        body.push_str("        </article>\n");
    }

    let generated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC");
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{title} — token colors</title>
    <style>
        body {{ margin: 2rem; background: #f4f4f7; color: #1c1c28; font-family: system-ui, sans-serif; }}
        h1 {{ font-weight: 600; }}
        .grid {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 1rem; }}
        .card {{ background: #fff; border-radius: 10px; padding: 1rem; box-shadow: 0 1px 3px rgba(0,0,0,0.12); }}
        .card h2 {{ margin: 0.5rem 0; font-size: 1.1rem; }}
        .logo {{ width: 64px; height: 64px; object-fit: contain; }}
        .swatches {{ list-style: none; margin: 0; padding: 0; font-size: 0.85rem; }}
        .swatches li {{ display: flex; align-items: center; gap: 0.5rem; margin: 0.25rem 0; }}
        .chip {{ width: 1rem; height: 1rem; border-radius: 3px; border: 1px solid rgba(0,0,0,0.15); }}
        .gradient {{ height: 2.5rem; border-radius: 6px; margin-top: 0.75rem; }}
        footer {{ margin-top: 2rem; font-size: 0.8rem; color: #6b6b76; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <main class="grid">
{body}    </main>
    <footer>generated by tokentint v{version} at {generated_at}</footer>
</body>
</html>
"#,
        title = escape_html(title),
        version = env!("CARGO_PKG_VERSION"),
    )
}

/// Escape text for safe interpolation into HTML content and attributes.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_triple() -> ColorTriple {
        ColorTriple {
            average: Color::parse("#ff0000").unwrap(),
            dominant1: Color::parse("#ff0000").unwrap(),
            dominant2: Color::parse("#ffe6e6").unwrap(),
        }
    }

    #[test]
    fn renders_one_card_per_token() {
        let cards = vec![
            PreviewCard {
                symbol: "AAA".into(),
                logo_uri: Some("https://x/a.png".into()),
                colors: Some(red_triple()),
            },
            PreviewCard {
                symbol: "BBB".into(),
                logo_uri: None,
                colors: None,
            },
        ];

        let html = render_preview("Test List", &cards);
        assert_eq!(html.matches("<article class=\"card\">").count(), 2);
        assert!(html.contains("<h2>AAA</h2>"));
        assert!(html.contains("<h2>BBB</h2>"));
    }

    #[test]
    fn enriched_card_has_gradient_and_swatches() {
        let cards = vec![PreviewCard {
            symbol: "AAA".into(),
            logo_uri: Some("https://x/a.png".into()),
            colors: Some(red_triple()),
        }];

        let html = render_preview("Test List", &cards);
        assert!(html.contains("linear-gradient(135deg, #ff0000, #ffe6e6)"));
        assert_eq!(html.matches("class=\"chip\"").count(), 3);
        assert!(html.contains("<code>#ff0000</code>"));
    }

    #[test]
    fn skipped_card_has_no_swatches() {
        let cards = vec![PreviewCard {
            symbol: "BBB".into(),
            logo_uri: None,
            colors: None,
        }];

        let html = render_preview("Test List", &cards);
        assert!(!html.contains("class=\"chip\""));
        assert!(!html.contains("linear-gradient"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn html_is_escaped() {
        let cards = vec![PreviewCard {
            symbol: "<script>".into(),
            logo_uri: Some("https://x/a.png?a=1&b=\"2\"".into()),
            colors: None,
        }];

        let html = render_preview("A & B", &cards);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("A &amp; B"));
        assert!(html.contains("a=1&amp;b=&quot;2&quot;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn cards_from_enriched_document() {
        let doc: Value = serde_json::from_str(
            r##"{
                "name": "My List",
                "tokens": [
                    {"symbol": "AAA", "logoURI": "https://x/a.png",
                     "averageColor": "#ff0000", "dominantColor1": "#ff0000", "dominantColor2": "#ffe6e6"},
                    {"symbol": "BBB"}
                ]
            }"##,
        )
        .unwrap();

        let cards = cards_from_document(&doc, &FieldNames::default()).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(list_title(&doc), "My List");

        assert_eq!(cards[0].symbol, "AAA");
        assert_eq!(cards[0].colors.unwrap().average.to_hex(), "#ff0000");
        assert_eq!(cards[1].symbol, "BBB");
        assert!(cards[1].colors.is_none());
        assert!(cards[1].logo_uri.is_none());
    }

    #[test]
    fn cards_require_tokens_array() {
        let doc: Value = serde_json::from_str(r#"{"name": "Empty"}"#).unwrap();
        let err = cards_from_document(&doc, &FieldNames::default()).unwrap_err();
        assert!(err.to_string().contains("'tokens' array"));
    }
}
