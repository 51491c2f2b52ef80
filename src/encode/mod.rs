mod writer;

use crate::options::SerializeOptions;
use crate::value::{Data, Value};

use writer::Writer;

/// Compact JSON text for `value`.
///
/// Object members come out in table slot order. A value that contains
/// itself recurses without bound. Trees nested deeper than
/// [`ParseOptions::max_depth`](crate::ParseOptions::max_depth) are written
/// in full but need a raised limit to parse back.
pub fn to_string(value: &Value) -> String {
    to_string_with_options(value, &SerializeOptions::compact())
}

/// Indented JSON text, two spaces per level.
pub fn to_string_pretty(value: &Value) -> String {
    to_string_with_options(value, &SerializeOptions::pretty())
}

pub fn to_string_with_options(value: &Value, options: &SerializeOptions) -> String {
    let mut writer = Writer::new(options.clone());
    write_value(&mut writer, value, 0);
    writer.finish()
}

fn write_value(writer: &mut Writer, value: &Value, depth: usize) {
    match value.data() {
        Data::String(text) => writer.write_quoted_string(text),
        Data::Number(n) => writer.write_number(*n),
        Data::True => writer.write_str("true"),
        Data::False => writer.write_str("false"),
        Data::Null => writer.write_str("null"),
        Data::Object(table) => {
            let table = table.borrow();
            if table.is_empty() {
                writer.write_str("{}");
                return;
            }
            writer.write_char('{');
            writer.write_newline();
            for (i, (key, member)) in table.iter().enumerate() {
                if i > 0 {
                    writer.write_char(',');
                    writer.write_newline();
                }
                writer.write_indent(depth + 1);
                writer.write_quoted_string(key);
                writer.write_colon();
                write_value(writer, member, depth + 1);
            }
            writer.write_newline();
            writer.write_indent(depth);
            writer.write_char('}');
        }
        Data::Array(items) => {
            let items = items.borrow();
            if items.is_empty() {
                writer.write_str("[]");
                return;
            }
            writer.write_char('[');
            writer.write_newline();
            for (i, element) in items.iter().enumerate() {
                if i > 0 {
                    writer.write_char(',');
                    writer.write_newline();
                }
                writer.write_indent(depth + 1);
                write_value(writer, element, depth + 1);
            }
            writer.write_newline();
            writer.write_indent(depth);
            writer.write_char(']');
        }
    }
}
