//! # Dashboard aggregation
//!
//! The API has no rollup endpoints, so dashboard figures are derived here from
//! the raw collections. Every call refetches and recomputes; nothing is cached.
//!
//! The `compute` functions are pure and take the current instant explicitly,
//! which keeps the "today" window testable in any time zone.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use carestay_types::{
    Appointment, AppointmentFilter, AppointmentStatus, Center, CenterFilter, Notification,
    NotificationFilter, Role, TransportationFilter, TransportationRequest, User, UserFilter,
};

use crate::error::ApiResult;
use crate::resource::ReadApi;
use crate::ApiClient;

/// Number of appointments shown in the admin "recent" list.
pub const RECENT_APPOINTMENTS: usize = 5;

/// Facility-wide figures for administrators.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdminStats {
    /// Number of centers.
    pub total_centers: usize,
    /// Number of user accounts.
    pub total_users: usize,
    /// Accounts with the patient role.
    pub total_patients: usize,
    /// Accounts with the provider role.
    pub total_providers: usize,
    /// Accounts with the admin role.
    pub total_admins: usize,
    /// Number of appointments.
    pub total_appointments: usize,
    /// Appointments still scheduled.
    pub scheduled_appointments: usize,
    /// Appointments completed.
    pub completed_appointments: usize,
    /// Appointments cancelled.
    pub cancelled_appointments: usize,
    /// Appointments rescheduled.
    pub rescheduled_appointments: usize,
    /// The most recent appointments by start time, newest first.
    pub recent_appointments: Vec<Appointment>,
}

impl AdminStats {
    /// Derives admin figures from full collections.
    pub fn compute(centers: &[Center], users: &[User], appointments: &[Appointment]) -> Self {
        let count_role = |role: Role| users.iter().filter(|u| u.role == role).count();
        let count_status =
            |status: AppointmentStatus| appointments.iter().filter(|a| a.status == status).count();

        let mut recent = appointments.to_vec();
        recent.sort_by(|a, b| b.appointment_datetime.cmp(&a.appointment_datetime));
        recent.truncate(RECENT_APPOINTMENTS);

        Self {
            total_centers: centers.len(),
            total_users: users.len(),
            total_patients: count_role(Role::Patient),
            total_providers: count_role(Role::Provider),
            total_admins: count_role(Role::Admin),
            total_appointments: appointments.len(),
            scheduled_appointments: count_status(AppointmentStatus::Scheduled),
            completed_appointments: count_status(AppointmentStatus::Completed),
            cancelled_appointments: count_status(AppointmentStatus::Cancelled),
            rescheduled_appointments: count_status(AppointmentStatus::Rescheduled),
            recent_appointments: recent,
        }
    }
}

/// Figures for one provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProviderStats {
    /// All of the provider's appointments.
    pub total_appointments: usize,
    /// Appointments starting today, any status.
    pub today_appointments: usize,
    /// Scheduled appointments starting after today.
    pub upcoming_appointments: usize,
    /// Completed appointments.
    pub completed_appointments: usize,
    /// Distinct patients across all appointments.
    pub unique_patients: usize,
    /// Today's appointments, earliest first.
    pub todays_schedule: Vec<Appointment>,
    /// Upcoming appointments, earliest first.
    pub upcoming_schedule: Vec<Appointment>,
}

impl ProviderStats {
    /// Derives provider figures. `now` fixes both the instant and the time
    /// zone whose calendar day counts as "today".
    pub fn compute<Tz: TimeZone>(
        provider_id: u64,
        appointments: &[Appointment],
        now: &DateTime<Tz>,
    ) -> Self {
        let window = DayWindow::containing(now);
        let mine: Vec<&Appointment> = appointments
            .iter()
            .filter(|a| a.provider_id == provider_id)
            .collect();

        let mut todays_schedule: Vec<Appointment> = mine
            .iter()
            .filter(|a| window.contains(&a.appointment_datetime))
            .map(|a| (*a).clone())
            .collect();
        todays_schedule.sort_by_key(|a| a.appointment_datetime);

        let mut upcoming_schedule: Vec<Appointment> = mine
            .iter()
            .filter(|a| a.is_scheduled() && a.appointment_datetime >= window.end)
            .map(|a| (*a).clone())
            .collect();
        upcoming_schedule.sort_by_key(|a| a.appointment_datetime);

        let unique_patients = mine
            .iter()
            .map(|a| a.patient_id)
            .collect::<HashSet<_>>()
            .len();

        Self {
            total_appointments: mine.len(),
            today_appointments: todays_schedule.len(),
            upcoming_appointments: upcoming_schedule.len(),
            completed_appointments: mine
                .iter()
                .filter(|a| a.status == AppointmentStatus::Completed)
                .count(),
            unique_patients,
            todays_schedule,
            upcoming_schedule,
        }
    }
}

/// Figures for one patient.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatientStats {
    /// All of the patient's appointments.
    pub total_appointments: usize,
    /// Scheduled appointments starting now or later.
    pub upcoming_appointments: usize,
    /// Completed appointments.
    pub completed_appointments: usize,
    /// Transportation requests awaiting dispatch.
    pub pending_transportation: usize,
    /// Unread notifications.
    pub unread_notifications: usize,
    /// The soonest upcoming appointment.
    pub next_appointment: Option<Appointment>,
}

impl PatientStats {
    /// Derives patient figures.
    pub fn compute(
        patient_id: u64,
        appointments: &[Appointment],
        transportation: &[TransportationRequest],
        notifications: &[Notification],
        now: DateTime<Utc>,
    ) -> Self {
        let mine: Vec<&Appointment> = appointments
            .iter()
            .filter(|a| a.patient_id == patient_id)
            .collect();

        let mut upcoming: Vec<&Appointment> = mine
            .iter()
            .copied()
            .filter(|a| a.is_scheduled() && a.appointment_datetime >= now)
            .collect();
        upcoming.sort_by_key(|a| a.appointment_datetime);

        Self {
            total_appointments: mine.len(),
            upcoming_appointments: upcoming.len(),
            completed_appointments: mine
                .iter()
                .filter(|a| a.status == AppointmentStatus::Completed)
                .count(),
            pending_transportation: transportation
                .iter()
                .filter(|t| t.patient_id.map_or(true, |p| p == patient_id) && t.is_pending())
                .count(),
            unread_notifications: notifications.iter().filter(|n| !n.is_read).count(),
            next_appointment: upcoming.first().map(|a| (*a).clone()),
        }
    }
}

/// A local calendar day expressed as a half-open UTC interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    /// Local midnight at the start of the day.
    pub start: DateTime<Utc>,
    /// Local midnight at the start of the next day.
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// The day containing `now`, in `now`'s time zone.
    pub fn containing<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let today = now.date_naive();
        let start = local_midnight(&tz, today).unwrap_or_else(|| now.with_timezone(&Utc));
        let end = today
            .succ_opt()
            .and_then(|tomorrow| local_midnight(&tz, tomorrow))
            .unwrap_or(start + Duration::days(1));
        Self { start, end }
    }

    /// Returns true if `instant` falls inside the day.
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start && *instant < self.end
    }
}

fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateTime<Utc>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    // Zones that skip midnight on a DST change start the day an hour later.
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Dashboard figures per role.
#[async_trait]
pub trait DashboardSource: Send + Sync {
    /// Facility-wide figures.
    async fn admin_stats(&self) -> ApiResult<AdminStats>;

    /// Figures for one provider.
    async fn provider_stats(&self, provider_id: u64) -> ApiResult<ProviderStats>;

    /// Figures for one patient.
    async fn patient_stats(&self, patient_id: u64) -> ApiResult<PatientStats>;
}

/// Aggregates dashboard figures from the resource endpoints.
#[derive(Debug, Clone)]
pub struct DashboardApi {
    client: ApiClient,
}

impl DashboardApi {
    /// Creates the aggregator on top of a shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DashboardSource for DashboardApi {
    async fn admin_stats(&self) -> ApiResult<AdminStats> {
        let centers = self.client.centers();
        let users = self.client.users();
        let appointments = self.client.appointments();
        let center_filter = CenterFilter::default();
        let user_filter = UserFilter::default();
        let appointment_filter = AppointmentFilter::default();

        let (centers, users, appointments) = futures::try_join!(
            centers.list(&center_filter),
            users.list(&user_filter),
            appointments.list(&appointment_filter),
        )?;

        tracing::debug!(
            centers = centers.len(),
            users = users.len(),
            appointments = appointments.len(),
            "Computing admin dashboard"
        );
        Ok(AdminStats::compute(&centers, &users, &appointments))
    }

    async fn provider_stats(&self, provider_id: u64) -> ApiResult<ProviderStats> {
        let appointments = self
            .client
            .appointments()
            .list(&AppointmentFilter::for_provider(provider_id))
            .await?;
        Ok(ProviderStats::compute(
            provider_id,
            &appointments,
            &Local::now(),
        ))
    }

    async fn patient_stats(&self, patient_id: u64) -> ApiResult<PatientStats> {
        let appointments = self.client.appointments();
        let transportation = self.client.transportation();
        let notifications = self.client.notifications();
        let appointment_filter = AppointmentFilter::for_patient(patient_id);
        let transportation_filter = TransportationFilter {
            patient_id: Some(patient_id),
            ..TransportationFilter::default()
        };
        let notification_filter = NotificationFilter::default();

        let (appointments, transportation, notifications) = futures::try_join!(
            appointments.list(&appointment_filter),
            transportation.list(&transportation_filter),
            notifications.list(&notification_filter),
        )?;

        Ok(PatientStats::compute(
            patient_id,
            &appointments,
            &transportation,
            &notifications,
            Utc::now(),
        ))
    }
}
