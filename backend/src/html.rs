//! Minimal HTML slicing helpers for the scrape provider.
//!
//! Upstream markup changes are an expected failure mode, so these are
//! forgiving, case-insensitive string scans rather than a full parser;
//! callers treat "not found" as an empty result.

fn to_lower_ascii(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Find the block starting at the first occurrence of `marker` (inside an
/// opening tag) at or after `from`, running to the end of `close`.
/// Returns the byte range of the block.
pub fn next_block_ci(s: &str, marker: &str, close: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower_ascii(s);
    let ml = to_lower_ascii(marker);
    let cl = to_lower_ascii(close);
    let start = lc.get(from..)?.find(&ml)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    Some((start, open_end + end_rel + close.len()))
}

/// Inner text of the first element whose opening tag contains `open_marker`,
/// up to `close`. The opening tag itself is skipped.
pub fn slice_between_ci<'a>(s: &'a str, open_marker: &str, close: &str) -> Option<&'a str> {
    let lc = to_lower_ascii(s);
    let o = lc.find(&to_lower_ascii(open_marker))?;
    let after = s[o..].find('>')? + o + 1;
    let cr = lc[after..].find(&to_lower_ascii(close))?;
    Some(&s[after..after + cr])
}

/// Value of the first `name="..."` attribute at or after the start of `s`.
pub fn attr_ci<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    let lc = to_lower_ascii(s);
    let pat = format!("{}=\"", to_lower_ascii(name));
    let at = lc.find(&pat)? + pat.len();
    let end = s[at..].find('"')? + at;
    Some(&s[at..end])
}

/// Drop all tags and collapse runs of whitespace.
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNIPPET: &str = r#"<ul>
      <li class="ListItemSplit u-mb">
        <a class="Link--inverted" href="/souteze/club/club/123">
          <img src="https://img.example/123.jpg" alt="">
          <span class="H7">SK Slavia Praha</span>
        </a>
      </li>
    </ul>"#;

    #[test]
    fn finds_block_by_marker() {
        let (start, end) = next_block_ci(SNIPPET, "ListItemSplit", "</li>", 0).unwrap();
        let block = &SNIPPET[start..end];
        assert!(block.contains("Link--inverted"));
        assert!(block.ends_with("</li>"));
    }

    #[test]
    fn no_further_block_after_end() {
        let (_, end) = next_block_ci(SNIPPET, "ListItemSplit", "</li>", 0).unwrap();
        assert!(next_block_ci(SNIPPET, "ListItemSplit", "</li>", end).is_none());
    }

    #[test]
    fn slices_inner_text() {
        assert_eq!(
            slice_between_ci(SNIPPET, "<span class=\"H7", "</span>").map(str::trim),
            Some("SK Slavia Praha")
        );
    }

    #[test]
    fn extracts_attribute_values() {
        assert_eq!(attr_ci(SNIPPET, "href"), Some("/souteze/club/club/123"));
        let img_at = SNIPPET.find("<img").unwrap();
        assert_eq!(
            attr_ci(&SNIPPET[img_at..], "src"),
            Some("https://img.example/123.jpg")
        );
    }

    #[test]
    fn strip_tags_collapses_whitespace() {
        assert_eq!(
            strip_tags("<p>SK  <b>Slavia</b>\n Praha</p>"),
            "SK Slavia Praha"
        );
    }
}
