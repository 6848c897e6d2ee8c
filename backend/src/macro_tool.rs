#[macro_export]
#[cfg(feature = "insecure-print")]
macro_rules! report_internal {
    ($level:ident,$pattern:literal, $error:expr) => {{
        tracing::$level!($pattern, $error);
        (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            $error.to_string(),
        )
            .into_response()
    }};
}

#[macro_export]
#[cfg(not(feature = "insecure-print"))]
macro_rules! report_internal {
    ($level:ident,$pattern:literal, $error:expr) => {{
        tracing::$level!($pattern, $error);
        (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            "unknown error",
        )
            .into_response()
    }};
}

/// copy `Option` fields of `$src` into `$target` when present
#[macro_export]
macro_rules! fill_exist_active_model {
    ($target:expr,$src:expr , $field:ident) => {
        if let Some(x) = $src.$field {
            $target.$field = ActiveValue::Set(x);
        }
    };
    ($target:expr,$src:expr, $field:ident, $($ext:ident),+) => {
        fill_exist_active_model!($target,$src, $field);
        fill_exist_active_model!($target,$src, $($ext),+);
    };
}

/// copy fields of `$src` into `$target`
#[macro_export]
macro_rules! fill_active_model {
    ($target:expr,$src:expr , $field:ident) => {
        $target.$field = ActiveValue::Set($src.$field);
    };
    ($target:expr,$src:expr, $field:ident, $($ext:ident),+) => {
        fill_active_model!($target,$src, $field);
        fill_active_model!($target,$src, $($ext),+);
    };
}
