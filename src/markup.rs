// 📝 Description Parser - Breach descriptions arrive as HTML fragments
//
// The engine only needs (plain text, reference links). Rendering is a seam:
// plug in a full HTML parser by implementing `DescriptionParser`.

use regex::{Captures, Regex};

pub trait DescriptionParser: Send + Sync {
    /// Returns (plain text, "; "-joined hrefs)
    fn parse(&self, markup: &str) -> (String, String);
}

/// Lightweight tag stripper good enough for provider-authored snippets
#[derive(Debug, Clone)]
pub struct HtmlDescription {
    href: Regex,
    tag: Regex,
    entity: Regex,
}

impl HtmlDescription {
    pub fn new() -> Self {
        HtmlDescription {
            href: Regex::new(r#"(?i)<a\s[^>]*?href\s*=\s*["']([^"']+)["']"#).expect("valid href pattern"),
            tag: Regex::new(r"<[^>]*>").expect("valid tag pattern"),
            entity: Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);").expect("valid entity pattern"),
        }
    }

    /// Single pass, so "&amp;lt;" stays "&lt;"
    fn decode_entities(&self, text: &str) -> String {
        self.entity
            .replace_all(text, |caps: &Captures| {
                let body = &caps[1];
                let decoded = match body.strip_prefix('#') {
                    Some(num) => numeric_entity(num),
                    None => named_entity(body),
                };
                match decoded {
                    Some(c) => c.to_string(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

fn numeric_entity(num: &str) -> Option<char> {
    let code = match num.strip_prefix(&['x', 'X'][..]) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => num.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

fn named_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "nbsp" => Some(' '),
        "ndash" => Some('\u{2013}'),
        "mdash" => Some('\u{2014}'),
        "rsquo" => Some('\u{2019}'),
        "lsquo" => Some('\u{2018}'),
        "rdquo" => Some('\u{201D}'),
        "ldquo" => Some('\u{201C}'),
        "hellip" => Some('\u{2026}'),
        _ => None,
    }
}

impl Default for HtmlDescription {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptionParser for HtmlDescription {
    fn parse(&self, markup: &str) -> (String, String) {
        let links: Vec<&str> = self
            .href
            .captures_iter(markup)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();

        let text = self.decode_entities(&self.tag.replace_all(markup, ""));

        (text, links.join("; "))
    }
}
