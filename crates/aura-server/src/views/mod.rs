//! Server-rendered HTML pages.
//!
//! Markup is built with plain string formatting; the pages are small and
//! regular enough that a template engine would outweigh them. Everything
//! user-entered goes through [`escape`] on the way out.

pub mod episodes;
pub mod home;
pub mod lookups;
pub mod medications;
pub mod tables;

const STYLE: &str = "\
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 60rem; padding: 0 1rem; }
table { border-collapse: collapse; margin: 1rem 0; }
th, td { border: 1px solid #999; padding: 0.3rem 0.6rem; text-align: left; }
nav a { margin-right: 0.75rem; }
form.inline { display: inline; }
label { display: block; margin-top: 0.6rem; }
";

/// Escape text for interpolation into HTML bodies and attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Wrap page content in the shared document shell and navigation bar.
pub fn layout(title: &str, body: &str) -> String {
    let title = escape(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Aura</title>
<style>
{STYLE}</style>
</head>
<body>
<nav>
<a href="/">Home</a>
<a href="/episodes">Episodes</a>
<a href="/medications">Medications</a>
<a href="/symptoms">Symptoms</a>
<a href="/triggers">Triggers</a>
<a href="/pain_locations">Pain locations</a>
<a href="/attack_types">Attack types</a>
<a href="/tables">Tables</a>
</nav>
<hr>
{body}
</body>
</html>
"#
    )
}

#[cfg(test)]
#[allow(unused_results)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_html_metacharacters() {
        assert_eq!(
            escape(r#"<b>"dry" & 'hot'</b>"#),
            "&lt;b&gt;&quot;dry&quot; &amp; &#39;hot&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn escape_passes_plain_text_through() {
        assert_eq!(escape("Sumatriptan (50mg)"), "Sumatriptan (50mg)");
    }

    #[test]
    fn layout_escapes_the_title() {
        let page = layout("<script>", "<p>hi</p>");
        assert!(page.contains("&lt;script&gt; | Aura"));
        assert!(page.contains("<p>hi</p>"));
    }

    #[test]
    fn layout_links_every_section() {
        let page = layout("Home", "");
        for href in [
            "/episodes",
            "/medications",
            "/symptoms",
            "/triggers",
            "/pain_locations",
            "/attack_types",
            "/tables",
        ] {
            assert!(page.contains(&format!(r#"href="{href}""#)), "missing {href}");
        }
    }
}
