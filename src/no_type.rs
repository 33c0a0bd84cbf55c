use std::any::TypeId;

/// Type argument meaning "no payload of this kind".
///
/// Pass it in place of a request, response or error payload type to skip
/// the corresponding JSON encoding or decoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct NoType;

/// Returns `true` when `T` is [`NoType`].
pub fn is_no_type<T>() -> bool
where
    T: ?Sized + 'static,
{
    TypeId::of::<T>() == TypeId::of::<NoType>()
}

/// Returns `true` when `value` equals `T::default()`.
pub fn is_zero_value<T>(value: &T) -> bool
where
    T: Default + PartialEq,
{
    *value == T::default()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    #[derive(Default, PartialEq)]
    struct Record {
        i: i64,
        s: String,
    }

    #[test]
    fn test_is_no_type() {
        assert!(super::is_no_type::<super::NoType>());
        assert!(!super::is_no_type::<()>());
        assert!(!super::is_no_type::<String>());
        assert!(!super::is_no_type::<str>());
        assert!(!super::is_no_type::<Record>());
        assert!(!super::is_no_type::<Option<super::NoType>>());
    }

    #[test]
    fn test_is_zero_value() {
        assert!(super::is_zero_value(&0));
        assert!(!super::is_zero_value(&1u8));
        assert!(super::is_zero_value(&String::new()));
        assert!(!super::is_zero_value(&"one".to_owned()));
        assert!(super::is_zero_value(&Record::default()));
        assert!(!super::is_zero_value(&Record {
            i: 1,
            ..Record::default()
        }));
        assert!(!super::is_zero_value(&Record {
            s: "one".to_owned(),
            ..Record::default()
        }));
        assert!(super::is_zero_value(&Vec::<u8>::new()));
        assert!(!super::is_zero_value(&BTreeMap::from([(1, 1)])));
        assert!(super::is_zero_value(&super::NoType));
    }
}
