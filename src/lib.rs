pub mod api;

pub use api::{
    config::Config,
    err::CustomError,
    query::StudentFilter,
    session::{MockSessionProvider, SessionProvider},
    stats::DashboardSummary,
    store::StudentStore,
    student::{NewStudent, Student, StudentPatch},
    AppState,
};
