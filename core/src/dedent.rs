//! Common-indentation removal for documentation blocks.

/// Removes the longest run of leading spaces and tabs shared by every
/// non-blank line of `text`.
///
/// Lines made only of spaces and tabs are normalized to empty lines and do not
/// take part in computing the margin. Indentation relative to the block is
/// preserved, so applying `dedent` twice is the same as applying it once.
///
/// # Examples
///
/// ```
/// use docargs_core::dedent;
///
/// let block = "    first\n      nested\n    \n    last";
/// assert_eq!(dedent(block), "first\n  nested\n\nlast");
/// ```
pub fn dedent(text: &str) -> String {
    let margin = common_margin(text);
    text.split('\n')
        .map(|line| {
            if is_blank(line) {
                ""
            } else {
                &line[margin.len()..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn common_margin(text: &str) -> &str {
    let mut margin: Option<&str> = None;
    for line in text.split('\n').filter(|line| !is_blank(line)) {
        let indent = leading_indent(line);
        margin = Some(match margin {
            None => indent,
            Some(current) => common_prefix(current, indent),
        });
        if margin == Some("") {
            break;
        }
    }
    margin.unwrap_or_default()
}

fn leading_indent(line: &str) -> &str {
    let rest = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - rest.len()]
}

/// Longest shared prefix of two indentation runs.
///
/// Both inputs hold only ASCII spaces and tabs, so byte positions are always
/// character boundaries.
fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let shared = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..shared]
}

fn is_blank(line: &str) -> bool {
    line.trim_matches([' ', '\t']).is_empty()
}
