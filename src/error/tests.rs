//! Tests for error types.

#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("debounce cannot be 0");
        assert_eq!(
            err.to_string(),
            "configuration error: debounce cannot be 0"
        );
    }

    #[test]
    fn test_no_root_set_display() {
        let err = Error::NoRootSet;
        assert_eq!(err.to_string(), "root directory is not set");
    }

    #[test]
    fn test_access_denied_display() {
        let err = Error::access_denied("/etc/passwd");
        assert_eq!(err.to_string(), "access to '/etc/passwd' is not allowed");
    }

    #[test]
    fn test_access_denied_distinct_from_no_root() {
        // The presentation layer tells "nothing to show" apart from
        // "blocked for security reasons" by message alone.
        let denied = Error::access_denied("/etc/passwd");
        let no_root = Error::NoRootSet;
        assert_ne!(denied.to_string(), no_root.to_string());
    }

    #[test]
    fn test_invalid_input_display() {
        let err = Error::invalid_input("empty path");
        assert_eq!(err.to_string(), "invalid input: empty path");
    }

    #[test]
    fn test_watch_error_conversion() {
        let watch_err = WatchError::InitFailed {
            path: "/tmp/test".to_string(),
            reason: "permission denied".to_string(),
        };
        let err: Error = watch_err.into();
        assert!(matches!(err, Error::Watch(_)));
        assert_eq!(
            err.to_string(),
            "watch error: failed to watch '/tmp/test': permission denied"
        );
    }

    #[test]
    fn test_watch_error_backend() {
        let err = WatchError::Backend("inotify queue overflow".to_string());
        assert_eq!(
            err.to_string(),
            "watch backend error: inotify queue overflow"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(Error::NoRootSet)
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn inner() -> Result<i32> {
            Err(Error::config("inner error"))
        }

        fn outer() -> Result<i32> {
            let _ = inner()?;
            Ok(0)
        }

        let result = outer();
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "configuration error: inner error"
        );
    }

    #[test]
    fn test_error_debug_format() {
        let err = Error::invalid_input("bad URI");
        let debug_str = format!("{err:?}");
        assert!(debug_str.contains("InvalidInput"));
        assert!(debug_str.contains("bad URI"));
    }
}
