use crate::{
    notification::send_unsent_notifications::SendUnsentNotificationsUseCase,
    reminder::send_reminders::SendRemindersUseCase,
    shared::usecase::execute,
};
use actix_web::rt::time::interval;
use std::time::Duration;
use tracing::info;
use volp_infra::VolpContext;

/// Periodically sweeps all incomplete reminders and dispatches the
/// deadline notifications that fell due since the last tick. The sweep
/// is awaited inline so ticks never overlap within one process.
pub fn start_reminder_sweep_job(ctx: VolpContext) {
    actix_web::rt::spawn(async move {
        let mut sweep_interval = interval(Duration::from_secs(ctx.config.sweep_interval_secs));
        info!(
            "Starting reminder sweep job with interval of {} seconds",
            ctx.config.sweep_interval_secs
        );
        loop {
            sweep_interval.tick().await;

            let usecase = SendRemindersUseCase {};
            let _ = execute(usecase, &ctx).await;
        }
    });
}

/// Periodically retries email delivery for notifications whose row was
/// stored but whose email never went out.
pub fn start_notification_retry_job(ctx: VolpContext) {
    actix_web::rt::spawn(async move {
        let mut retry_interval = interval(Duration::from_secs(ctx.config.sweep_interval_secs));
        loop {
            retry_interval.tick().await;

            let usecase = SendUnsentNotificationsUseCase {};
            let _ = execute(usecase, &ctx).await;
        }
    });
}
