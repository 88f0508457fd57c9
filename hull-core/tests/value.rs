#[cfg(test)]
mod tests {
    use hull_core::{AsValue, Value};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use time::macros::{date, datetime, time};
    use uuid::Uuid;

    #[test]
    fn integers() {
        assert_eq!(i16::try_from_value(Value::Int64(Some(-300))).unwrap(), -300);
        assert_eq!(u8::try_from_value(Value::Int32(Some(255))).unwrap(), 255);
        assert!(u8::try_from_value(Value::Int32(Some(256))).is_err());
        assert!(u32::try_from_value(Value::Int8(Some(-1))).is_err());
        assert!(i64::try_from_value(Value::Varchar(Some("1".into()))).is_err());
        assert!(i64::try_from_value(Value::Null).is_err());
        assert!(bool::try_from_value(Value::Int64(Some(1))).unwrap());
        assert!(!bool::try_from_value(Value::Int64(Some(0))).unwrap());
    }

    #[test]
    fn floats_and_decimals() {
        assert_eq!(f64::try_from_value(Value::Int64(Some(3))).unwrap(), 3.0);
        assert_eq!(f32::try_from_value(Value::Float64(Some(0.5))).unwrap(), 0.5);
        let decimal = Decimal::from_str("12.345").unwrap();
        assert_eq!(
            Decimal::try_from_value(Value::Varchar(Some("12.345".into()))).unwrap(),
            decimal
        );
        assert_eq!(
            Decimal::try_from_value(Value::Int64(Some(12))).unwrap(),
            Decimal::from(12)
        );
        assert!(Decimal::try_from_value(Value::Varchar(Some("twelve".into()))).is_err());
    }

    #[test]
    fn text_encoded() {
        assert_eq!(
            time::Date::try_from_value(Value::Varchar(Some("2025-06-30".into()))).unwrap(),
            date!(2025 - 06 - 30)
        );
        assert_eq!(
            time::Time::try_from_value(Value::Varchar(Some("10:11:12".into()))).unwrap(),
            time!(10:11:12)
        );
        assert_eq!(
            time::PrimitiveDateTime::try_from_value(Value::Varchar(Some(
                "2025-06-30 10:11:12.5".into()
            )))
            .unwrap(),
            datetime!(2025-06-30 10:11:12.5)
        );
        assert_eq!(
            time::Date::try_from_value(datetime!(2025-06-30 10:11:12).as_value()).unwrap(),
            date!(2025 - 06 - 30)
        );
        let uuid = Uuid::parse_str("6f2bd4f6-8c3c-4c1f-9a56-2f0d8a4c1e00").unwrap();
        assert_eq!(
            Uuid::try_from_value(Value::Varchar(Some(uuid.to_string()))).unwrap(),
            uuid
        );
        assert_eq!(
            Uuid::try_from_value(Value::Blob(Some(uuid.as_bytes().as_slice().into()))).unwrap(),
            uuid
        );
        assert!(time::Date::try_from_value(Value::Varchar(Some("yesterday".into()))).is_err());
    }

    #[test]
    fn options() {
        assert_eq!(Option::<i32>::try_from_value(Value::Null).unwrap(), None);
        assert_eq!(Option::<i32>::try_from_value(Value::Int64(None)).unwrap(), None);
        assert_eq!(
            Option::<String>::try_from_value(Value::Varchar(Some("x".into()))).unwrap(),
            Some("x".to_string())
        );
        assert_eq!(None::<String>.as_value(), Value::Varchar(None));
        assert!(matches!(Option::<Uuid>::as_empty_value(), Value::Uuid(None)));
    }

    #[test]
    fn equality() {
        assert_eq!(Value::Int32(None), Value::Int32(None));
        assert_ne!(Value::Int32(Some(1)), Value::Int64(Some(1)));
        assert!(Value::Varchar(None).is_null());
        assert!(!Value::Varchar(Some(String::new())).is_null());
        assert!(Value::Int8(Some(1)).same_type(&Value::Int8(None)));
        assert_eq!(Value::UInt16(Some(7)).as_integer(), Some(7));
        assert_eq!(Value::Float32(Some(7.0)).as_integer(), None);
    }
}
