//! Assertion utilities for testing

/// Assert that two byte sequences are equal, printing both as hex on mismatch
#[macro_export]
macro_rules! assert_bytes_eq {
    ($left:expr, $right:expr) => {
        $crate::assert_bytes_eq!($left, $right, "")
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        match (&$left, &$right) {
            (left, right) => {
                let left: &[u8] = left.as_ref();
                let right: &[u8] = right.as_ref();
                assert!(
                    left == right,
                    "bytes differ: {}\n  left: {}\n right: {}",
                    format!($($arg)+),
                    $crate::__hex::encode(left),
                    $crate::__hex::encode(right)
                );
            }
        }
    };
}

/// Assert that bytes encode to the given lower-case hex string
#[macro_export]
macro_rules! assert_hex_eq {
    ($bytes:expr, $hex:expr) => {
        assert_eq!($crate::__hex::encode($bytes), $hex);
    };
}

/// Assert that a result is OK and unwrap it
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(err) => panic!("Expected Ok, got Err: {:?}", err),
        }
    };
    ($expr:expr, $($arg:tt)+) => {
        match $expr {
            Ok(val) => val,
            Err(err) => panic!("Expected Ok, got Err: {:?} ({})", err, format!($($arg)+)),
        }
    };
}

/// Assert that a result is Err and unwrap the error
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(val) => panic!("Expected Err, got Ok: {:?}", val),
            Err(err) => err,
        }
    };
    ($expr:expr, $($arg:tt)+) => {
        match $expr {
            Ok(val) => panic!("Expected Err, got Ok: {:?} ({})", val, format!($($arg)+)),
            Err(err) => err,
        }
    };
}
