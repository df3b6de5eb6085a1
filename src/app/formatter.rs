use crate::app::models::RunConfig;
use std::collections::HashSet;
use std::fmt::Write;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Accumulates the map entries produced by the walk, in visit order.
#[derive(Debug, Default)]
pub struct FragmentSink {
    byte_values: String,
    str_values: String,
    is_first_byte_val: bool,
    is_first_str_val: bool,
    byte_keys: HashSet<String>,
    str_keys: HashSet<String>,
}

impl FragmentSink {
    pub fn new() -> Self {
        Self {
            is_first_byte_val: true,
            is_first_str_val: true,
            ..Default::default()
        }
    }

    pub fn has_bytes(&self, key: &str) -> bool {
        self.byte_keys.contains(key)
    }

    pub fn has_str(&self, key: &str) -> bool {
        self.str_keys.contains(key)
    }

    pub fn push_bytes(&mut self, key: &str, data: &[u8]) {
        self.byte_values.push_str(separator(&mut self.is_first_byte_val));
        self.byte_values.push('\t');
        self.byte_values.push_str(&go_quote(key.as_bytes()));
        self.byte_values.push_str(": []byte{");
        for (i, v) in data.iter().enumerate() {
            if i > 0 {
                self.byte_values.push_str(", ");
            }
            let _ = write!(self.byte_values, "{}", v);
        }
        self.byte_values.push('}');
        self.byte_keys.insert(key.to_string());
    }

    pub fn push_str(&mut self, key: &str, data: &[u8]) {
        self.str_values.push_str(separator(&mut self.is_first_str_val));
        self.str_values.push('\t');
        self.str_values.push_str(&go_quote(key.as_bytes()));
        self.str_values.push_str(": ");
        self.str_values.push_str(&go_quote(data));
        self.str_keys.insert(key.to_string());
    }
}

fn separator(is_first: &mut bool) -> &'static str {
    if std::mem::replace(is_first, false) {
        "\n"
    } else {
        ",\n"
    }
}

/// Renders `data` as a double-quoted Go string literal.
///
/// Printable characters are kept, the usual C escapes are used where Go has
/// them, and everything else becomes `\x`, `\u` or `\U` escapes. Bytes that
/// are not valid UTF-8 are escaped individually so the literal decodes back
/// to exactly `data`.
pub fn go_quote(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() + 2);
    out.push('"');
    for chunk in data.utf8_chunks() {
        for c in chunk.valid().chars() {
            push_escaped_char(&mut out, c);
        }
        for b in chunk.invalid() {
            let _ = write!(out, "\\x{:02x}", b);
        }
    }
    out.push('"');
    out
}

fn push_escaped_char(out: &mut String, c: char) {
    match c {
        '"' => out.push_str("\\\""),
        '\\' => out.push_str("\\\\"),
        '\u{07}' => out.push_str("\\a"),
        '\u{08}' => out.push_str("\\b"),
        '\u{0c}' => out.push_str("\\f"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\u{0b}' => out.push_str("\\v"),
        c if is_printable(c) => out.push(c),
        c if (c as u32) < 0x80 => {
            let _ = write!(out, "\\x{:02x}", c as u32);
        }
        c if (c as u32) < 0x10000 => {
            let _ = write!(out, "\\u{:04x}", c as u32);
        }
        c => {
            let _ = write!(out, "\\U{:08x}", c as u32);
        }
    }
}

/// Letters, marks, numbers, punctuation, symbols and the ASCII space.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::PrivateUse
            | GeneralCategory::Surrogate
            | GeneralCategory::Unassigned
            | GeneralCategory::SpaceSeparator
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}

pub struct OutputGenerator;

impl OutputGenerator {
    /// Builds the complete generated Go file.
    pub fn generate(sink: &FragmentSink, config: &RunConfig, invocation: &str) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "// Code generated by `{}`; DO NOT EDIT.", invocation);
        out.push('\n');
        let _ = writeln!(out, "package {}", config.package_name);
        out.push('\n');
        let _ = writeln!(
            out,
            "var byteFiles = map[string][]byte{{{}}}",
            sink.byte_values
        );
        out.push('\n');
        let _ = write!(out, "var strFiles = map[string]string{{{}}}", sink.str_values);

        if let Some(name) = &config.bytes_fn {
            out.push_str(&Self::bytes_fn(name));
        }
        if let Some(name) = &config.str_fn {
            out.push_str(&Self::str_fn(name));
        }

        out.push('\n');
        out
    }

    fn bytes_fn(name: &str) -> String {
        format!(
            "\n\n// {name} returns embedded file contents as a byte slice.\n\
             // If the file is not found, nil is returned.\n\
             func {name}(name string) []byte {{\n\
             \treturn byteFiles[name]\n\
             }}"
        )
    }

    fn str_fn(name: &str) -> String {
        format!(
            "\n\n// {name} returns embedded file contents as a string.\n\
             // In case no such file exists, an empty string is returned\n\
             // with the second argument returned as false.\n\
             func {name}(name string) (string, bool) {{\n\
             \ts, ok := strFiles[name]\n\
             \treturn s, ok\n\
             }}"
        )
    }
}
