//! ---
//! dr_section: "03-logging"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Structured logging context for DR decisions."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
/// Shared expansion behind the level-specific macros.
#[doc(hidden)]
#[macro_export]
macro_rules! __dr_event {
    ($level:expr, $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            $level,
            application = ctx.application.unwrap_or(""),
            namespace = ctx.namespace.unwrap_or(""),
            action = ctx.action.unwrap_or(""),
            cluster = ctx.cluster.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
}

/// Emit an informational log enriched with decision context.
#[macro_export]
macro_rules! dr_info {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__dr_event!(tracing::Level::INFO, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__dr_event!(tracing::Level::INFO, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit a debug log enriched with decision context.
#[macro_export]
macro_rules! dr_debug {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__dr_event!(tracing::Level::DEBUG, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__dr_event!(tracing::Level::DEBUG, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit a warning enriched with decision context.
#[macro_export]
macro_rules! dr_warn {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__dr_event!(tracing::Level::WARN, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__dr_event!(tracing::Level::WARN, $crate::LogContext::default(), $($arg)+)
    };
}
