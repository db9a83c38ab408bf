//! Tests for domain_hr

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use core_kernel::{Currency, DateRange, Timezone};
use domain_claims::{Actor, ApproverRole, Claim, ClaimPort, InMemoryClaimStore};

use domain_hr::lecturer::{sample_lecturers, NO_DEPARTMENT};
use domain_hr::{
    HrAnalytics, HrError, HrPort, HrService, InMemoryHrStore, Lecturer, LecturerUpdate,
    NewLecturer, PaymentReport,
};

fn hr_manager() -> Actor {
    Actor::new(Some("hr.admin".to_string()), ApproverRole::HrManager)
}

fn coordinator() -> Actor {
    Actor::new(Some("pc".to_string()), ApproverRole::ProgrammeCoordinator)
}

fn march() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
    )
    .unwrap()
}

fn claim_on(lecturer: &str, hours: Decimal, rate: Decimal, month: u32, day: u32) -> Claim {
    Claim::new(lecturer, hours, rate)
        .with_date(Utc.with_ymd_and_hms(2024, month, day, 12, 0, 0).unwrap())
}

fn approved_on(lecturer: &str, hours: Decimal, rate: Decimal, month: u32, day: u32) -> Claim {
    let mut claim = claim_on(lecturer, hours, rate, month, day);
    claim.approve("Academic Manager").unwrap();
    claim
}

fn service_with(claims: Vec<Claim>, tz: Timezone) -> (HrService, Arc<InMemoryHrStore>) {
    let hr = Arc::new(InMemoryHrStore::with_sample_data());
    let claim_store: Arc<dyn ClaimPort> = Arc::new(InMemoryClaimStore::with_claims(claims));
    let service = HrService::new(hr.clone(), claim_store, tz, Currency::USD);
    (service, hr)
}

fn new_lecturer(employee_id: &str, username: &str) -> NewLecturer {
    NewLecturer {
        employee_id: employee_id.to_string(),
        username: username.to_string(),
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: format!("{username}@university.edu"),
        department: Some("Computer Science".to_string()),
        ..Default::default()
    }
}

// ============================================================================
// Access Control Tests
// ============================================================================

mod access_tests {
    use super::*;

    #[tokio::test]
    async fn test_coordinator_is_turned_away() {
        let (service, _) = service_with(vec![], Timezone::default());

        let err = service.lecturers(&coordinator()).await.unwrap_err();
        assert!(matches!(err, HrError::Unauthorized(ref role) if role == "Programme Coordinator"));

        let err = service.generate_payment_report(&coordinator(), march()).await.unwrap_err();
        assert!(matches!(err, HrError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_lecturer_is_turned_away() {
        let (service, _) = service_with(vec![], Timezone::default());
        let lecturer = Actor::new(Some("john.doe".to_string()), ApproverRole::Lecturer);

        assert!(matches!(
            service.analytics(&lecturer).await,
            Err(HrError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_academic_manager_has_access() {
        let (service, _) = service_with(vec![], Timezone::default());
        let manager = Actor::new(None, ApproverRole::AcademicManager);

        let lecturers = service.lecturers(&manager).await.unwrap();
        assert_eq!(lecturers.len(), 3);
    }
}

// ============================================================================
// Roster Tests
// ============================================================================

mod roster_tests {
    use super::*;

    #[tokio::test]
    async fn test_roster_sorted_by_last_name() {
        let (service, _) = service_with(vec![], Timezone::default());

        let names: Vec<String> = service
            .lecturers(&hr_manager())
            .await
            .unwrap()
            .iter()
            .map(Lecturer::full_name)
            .collect();

        assert_eq!(names, vec!["John Doe", "Robert Johnson", "Jane Smith"]);
    }

    #[tokio::test]
    async fn test_create_and_lookup_by_employee_id() {
        let (service, _) = service_with(vec![], Timezone::default());

        let created = service
            .create_lecturer(&hr_manager(), new_lecturer("EMP100", "grace.hopper"))
            .await
            .unwrap();
        assert!(created.is_active);
        assert_eq!(created.default_hourly_rate, dec!(50));

        let found = service
            .lecturer_by_employee_id(&hr_manager(), "EMP100")
            .await
            .unwrap();
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn test_duplicate_employee_id_conflicts() {
        let (service, _) = service_with(vec![], Timezone::default());

        let err = service
            .create_lecturer(&hr_manager(), new_lecturer("EMP001", "someone.else"))
            .await
            .unwrap_err();
        assert!(matches!(err, HrError::Port(ref e) if e.to_string().contains("EMP001")));
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected() {
        let (service, _) = service_with(vec![], Timezone::default());
        let mut input = new_lecturer("EMP101", "bad.email");
        input.email = "not-an-email".to_string();

        let err = service.create_lecturer(&hr_manager(), input).await.unwrap_err();
        assert!(matches!(err, HrError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_and_deactivate() {
        let (service, _) = service_with(vec![], Timezone::default());
        let john = service
            .lecturer_by_employee_id(&hr_manager(), "EMP001")
            .await
            .unwrap();

        let update = LecturerUpdate {
            position: Some("Principal Lecturer".to_string()),
            default_hourly_rate: Some(dec!(70)),
            ..Default::default()
        };
        let updated = service
            .update_lecturer(&hr_manager(), john.id, update)
            .await
            .unwrap();
        assert_eq!(updated.position.as_deref(), Some("Principal Lecturer"));
        assert_eq!(updated.default_hourly_rate, dec!(70));
        assert!(updated.updated_at.is_some());

        service.deactivate_lecturer(&hr_manager(), john.id).await.unwrap();
        let after = service.lecturer(&hr_manager(), john.id).await.unwrap();
        assert!(!after.is_active);
    }

    #[tokio::test]
    async fn test_non_positive_rate_is_rejected() {
        let (service, _) = service_with(vec![], Timezone::default());
        let john = service
            .lecturer_by_employee_id(&hr_manager(), "EMP001")
            .await
            .unwrap();

        let update = LecturerUpdate {
            default_hourly_rate: Some(dec!(0)),
            ..Default::default()
        };
        let err = service
            .update_lecturer(&hr_manager(), john.id, update)
            .await
            .unwrap_err();
        assert!(matches!(err, HrError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_lecturer_is_not_found() {
        let (service, _) = service_with(vec![], Timezone::default());

        let err = service
            .deactivate_lecturer(&hr_manager(), core_kernel::LecturerId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, HrError::NotFound(_)));
    }
}

// ============================================================================
// Payment Report Tests
// ============================================================================

mod report_tests {
    use super::*;

    #[tokio::test]
    async fn test_report_covers_approved_claims_in_period() {
        let claims = vec![
            approved_on("john.doe", dec!(5), dec!(50), 3, 4),
            approved_on("jane.smith", dec!(8), dec!(45), 3, 31),
            approved_on("robert.johnson", dec!(12), dec!(60), 4, 1),
            claim_on("john.doe", dec!(3), dec!(50), 3, 10),
        ];
        let (service, _) = service_with(claims, Timezone::default());

        let report = service
            .generate_payment_report(&hr_manager(), march())
            .await
            .unwrap();

        assert_eq!(report.total_claims, 2);
        assert_eq!(report.total_amount.amount(), dec!(610));
        assert_eq!(report.generated_by, "hr.admin");
        assert!(report.lines.iter().all(|l| l.approved_by.is_some()));
    }

    #[tokio::test]
    async fn test_end_date_includes_the_whole_day() {
        let late = approved_on("jane.smith", dec!(2), dec!(40), 3, 31)
            .with_date(Utc.with_ymd_and_hms(2024, 3, 31, 23, 30, 0).unwrap());
        let (service, _) = service_with(vec![late], Timezone::default());

        let report = service
            .generate_payment_report(&hr_manager(), march())
            .await
            .unwrap();
        assert_eq!(report.total_claims, 1);
    }

    #[tokio::test]
    async fn test_period_uses_institution_timezone() {
        // 22:30 UTC on 31 March is already 1 April in Johannesburg
        let late = approved_on("jane.smith", dec!(2), dec!(40), 3, 31)
            .with_date(Utc.with_ymd_and_hms(2024, 3, 31, 22, 30, 0).unwrap());
        let tz: Timezone = "Africa/Johannesburg".parse().unwrap();
        let (service, _) = service_with(vec![late], tz);

        let report = service
            .generate_payment_report(&hr_manager(), march())
            .await
            .unwrap();
        assert_eq!(report.total_claims, 0);
        assert!(report.total_amount.is_zero());
    }

    #[tokio::test]
    async fn test_reports_are_stored_and_exported() {
        let claims = vec![approved_on("john.doe", dec!(5), dec!(50), 3, 4)];
        let (service, store) = service_with(claims, Timezone::default());

        let report = service
            .generate_payment_report(&hr_manager(), march())
            .await
            .unwrap();

        let stored = store.list_reports().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, report.id);

        let (file_name, bytes) = service.export_report(&hr_manager(), report.id).await.unwrap();
        assert_eq!(file_name, "PaymentReport_20240301_20240331.csv");

        let csv = String::from_utf8(bytes).unwrap();
        assert!(csv.contains("Total Amount,$250.00"));
        assert!(csv.contains("john.doe,2024-03-04,5,50,250,Academic Manager"));
    }

    #[tokio::test]
    async fn test_unknown_report_is_not_found() {
        let (service, _) = service_with(vec![], Timezone::default());

        let err = service
            .report(&hr_manager(), core_kernel::ReportId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, HrError::NotFound(_)));
    }

    #[test]
    fn test_build_ignores_rejected_claims() {
        let mut rejected = claim_on("john.doe", dec!(5), dec!(50), 3, 4);
        rejected.reject(Some("Duplicate".to_string())).unwrap();

        let report = PaymentReport::build(
            march(),
            &[rejected],
            "hr",
            &Timezone::default(),
            Currency::USD,
        );
        assert_eq!(report.total_claims, 0);
    }
}

// ============================================================================
// Analytics Tests
// ============================================================================

mod analytics_tests {
    use super::*;

    fn mid_march() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_monthly_figures() {
        let claims = vec![
            approved_on("john.doe", dec!(5), dec!(50), 3, 4),
            approved_on("john.doe", dec!(2), dec!(55), 3, 20),
            approved_on("jane.smith", dec!(8), dec!(45), 3, 12),
            approved_on("jane.smith", dec!(8), dec!(45), 2, 12),
            claim_on("robert.johnson", dec!(12), dec!(60), 3, 5),
        ];
        let (service, _) = service_with(claims, Timezone::default());

        let analytics = service.analytics_at(&hr_manager(), mid_march()).await.unwrap();

        assert_eq!(analytics.period, march());
        assert_eq!(analytics.total_lecturers, 3);
        assert_eq!(analytics.active_lecturers, 3);
        assert_eq!(analytics.inactive_lecturers, 0);
        assert_eq!(analytics.total_claims_this_month, 3);
        assert_eq!(analytics.total_payments_this_month.amount(), dec!(720));
        assert_eq!(analytics.average_claim_amount.amount(), dec!(240));
    }

    #[tokio::test]
    async fn test_department_breakdown_attributes_by_username() {
        let claims = vec![
            approved_on("john.doe", dec!(5), dec!(50), 3, 4),
            approved_on("jane.smith", dec!(8), dec!(45), 3, 12),
        ];
        let (service, _) = service_with(claims, Timezone::default());

        let analytics = service.analytics_at(&hr_manager(), mid_march()).await.unwrap();
        let departments: Vec<&str> = analytics
            .department_summaries
            .iter()
            .map(|d| d.department.as_str())
            .collect();
        assert_eq!(departments, vec!["Computer Science", "Mathematics", "Physics"]);

        let cs = &analytics.department_summaries[0];
        assert_eq!(cs.lecturer_count, 1);
        assert_eq!(cs.total_claims, 1);
        assert_eq!(cs.total_payments.amount(), dec!(250));

        let physics = &analytics.department_summaries[2];
        assert_eq!(physics.total_claims, 0);
        assert!(physics.total_payments.is_zero());
    }

    #[test]
    fn test_no_claims_gives_zero_average() {
        let analytics = HrAnalytics::compute(
            &sample_lecturers(),
            &[],
            march(),
            &Timezone::default(),
            Currency::USD,
        );
        assert!(analytics.average_claim_amount.is_zero());
        assert_eq!(analytics.total_claims_this_month, 0);
    }

    #[test]
    fn test_lecturers_without_department_are_grouped() {
        let mut lecturers = sample_lecturers();
        lecturers[0].department = None;
        lecturers[1].department = Some("  ".to_string());
        lecturers[2].deactivate();

        let analytics = HrAnalytics::compute(
            &lecturers,
            &[],
            march(),
            &Timezone::default(),
            Currency::USD,
        );

        let none = analytics
            .department_summaries
            .iter()
            .find(|d| d.department == NO_DEPARTMENT)
            .unwrap();
        assert_eq!(none.lecturer_count, 2);
        assert_eq!(analytics.inactive_lecturers, 1);
    }
}
