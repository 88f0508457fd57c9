use hull_core::{SqlWriter, writer::Context};
use std::fmt::Write;

/// SQLite dialect.
#[derive(Default, Debug, Clone, Copy)]
pub struct SqliteSqlWriter {}

impl SqlWriter for SqliteSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }

    fn write_value_infinity(&self, _context: &mut Context, out: &mut String, negative: bool) {
        if negative {
            out.push('-');
        }
        out.push_str("1.0e+10000");
    }

    fn write_value_nan(&self, context: &mut Context, out: &mut String) {
        // Stored as NULL by SQLite anyway
        self.write_value_none(context, out);
    }

    fn write_value_blob(&self, _context: &mut Context, out: &mut String, value: &[u8]) {
        out.push_str("X'");
        for b in value {
            let _ = write!(out, "{:02X}", b);
        }
        out.push('\'');
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteSqlWriter;
    use hull_core::{SqlWriter, Value, writer::Context};

    fn write(value: Value) -> String {
        let mut out = String::new();
        SqliteSqlWriter {}.write_value(&mut Context::default(), &mut out, &value);
        out
    }

    #[test]
    fn dialect_values() {
        assert_eq!(write(Value::Blob(Some([0x00, 0x1F, 0xFF].into()))), "X'001FFF'");
        assert_eq!(write(Value::Float64(Some(f64::INFINITY))), "1.0e+10000");
        assert_eq!(write(Value::Float32(Some(f32::NEG_INFINITY))), "-1.0e+10000");
        assert_eq!(write(Value::Float64(Some(f64::NAN))), "NULL");
        assert_eq!(write(Value::Varchar(Some("a'b".into()))), "'a''b'");
    }
}
