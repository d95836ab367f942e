use serde_json::Value;

// Attribution keys removed at every depth
const STRIPPED_KEYS: [&str; 3] = ["credit", "credits", "source"];

// Recursively scrub source-attribution from an upstream response before
// shape matching: drop forbidden keys, remove the vendor substring from
// string leaves (case-insensitive) and trim what remains. Primitives it
// does not recognize pass through untouched.
pub fn sanitize(value: &mut Value, vendor: &str) {
    match value {
        Value::Object(map) => {
            map.retain(|key, _| !STRIPPED_KEYS.contains(&key.as_str()));
            for child in map.values_mut() {
                sanitize(child, vendor);
            }
        }
        Value::Array(items) => {
            for child in items.iter_mut() {
                sanitize(child, vendor);
            }
        }
        Value::String(s) => {
            if !vendor.is_empty() && contains_ignore_ascii_case(s, vendor) {
                let scrubbed = strip_ignore_ascii_case(s, vendor);
                *s = scrubbed.trim().to_string();
            }
        }
        _ => {}
    }
}

fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|w| w.eq_ignore_ascii_case(needle.as_bytes()))
}

// Remove every occurrence of an ASCII needle, ignoring case. A match is
// all-ASCII bytes, so skipping it lands back on a char boundary.
fn strip_ignore_ascii_case(haystack: &str, needle: &str) -> String {
    let bytes = haystack.as_bytes();
    let mut out = String::with_capacity(haystack.len());
    let mut i = 0;

    while i < haystack.len() {
        if i + needle.len() <= haystack.len()
            && bytes[i..i + needle.len()].eq_ignore_ascii_case(needle.as_bytes())
        {
            i += needle.len();
            continue;
        }
        let ch = haystack[i..].chars().next().unwrap();
        out.push(ch);
        i += ch.len_utf8();
    }

    out
}
