use bigdecimal::BigDecimal;
use paycore::AppError;
use paycore::database::models::{
    FinanceConfirmationInput, GuardReason, PaymentMethod, PayslipStatus,
};
use pretty_assertions::assert_eq;

mod common;
use common::MockData;

fn finance(reference: &str) -> FinanceConfirmationInput {
    FinanceConfirmationInput {
        confirmed_by: "FIN-7".to_string(),
        payment_method: PaymentMethod::BankTransfer,
        bank_reference_id: Some(reference.to_string()),
    }
}

#[test]
fn test_finance_reference_survives_second_confirmation() {
    common::setup_test_env();
    let state = common::app_state();
    let service = &state.payslip_service;
    let employee = MockData::employee_id();

    let payslip = service
        .issue(MockData::payslip(&employee, BigDecimal::from(25000)))
        .unwrap();
    service.confirm(&payslip.id).unwrap();
    service.publish(&payslip.id).unwrap();
    service.sign(&payslip.id, "data:image/png;base64,AAAA").unwrap();

    service.confirm_paid_by_finance(&payslip.id, finance("REF-1")).unwrap();
    let second = service.confirm_paid_by_finance(&payslip.id, finance("REF-2")).unwrap();

    assert!(!second.applied);
    let stored = service.get(&payslip.id).unwrap();
    assert_eq!(stored.bank_reference_id.as_deref(), Some("REF-1"));
    assert_eq!(stored.status, PayslipStatus::Paid);
    assert_eq!(stored.paid_confirmed_by.as_deref(), Some("FIN-7"));
}

#[test]
fn test_status_never_regresses() {
    let state = common::app_state();
    let service = &state.payslip_service;
    let employee = MockData::employee_id();
    let payslip = service
        .issue(MockData::payslip(&employee, MockData::gross_pay()))
        .unwrap();

    let mut last_rank = payslip.status.rank();
    let attempts: Vec<Box<dyn Fn() -> PayslipStatus + '_>> = vec![
        Box::new(|| service.publish(&payslip.id).unwrap().record.status),
        Box::new(|| service.confirm(&payslip.id).unwrap().record.status),
        Box::new(|| service.acknowledge(&payslip.id, &employee).unwrap().record.status),
        Box::new(|| service.confirm(&payslip.id).unwrap().record.status),
        Box::new(|| service.publish(&payslip.id).unwrap().record.status),
        Box::new(|| {
            service
                .confirm_paid_by_finance(&payslip.id, finance("REF-1"))
                .unwrap()
                .record
                .status
        }),
        Box::new(|| service.acknowledge(&payslip.id, &employee).unwrap().record.status),
        Box::new(|| service.publish(&payslip.id).unwrap().record.status),
    ];

    for attempt in attempts {
        let status = attempt();
        assert!(status.rank() >= last_rank);
        last_rank = status.rank();
    }

    // Never signed, so acknowledgement was refused throughout
    assert_eq!(service.get(&payslip.id).unwrap().status, PayslipStatus::Paid);
}

#[test]
fn test_batch_locks_into_one_run() {
    let state = common::app_state();
    let service = &state.payslip_service;

    let inputs = (0..3)
        .map(|_| MockData::payslip(&MockData::employee_id(), MockData::gross_pay()))
        .collect();
    let batch = service.issue_batch(inputs).unwrap();
    let single = service
        .issue(MockData::payslip(&MockData::employee_id(), MockData::gross_pay()))
        .unwrap();

    let run = service.lock_run(batch[0].issued_at, "ADMIN-1").unwrap();
    assert!(run.applied);
    assert_eq!(run.record.payslip_ids.len(), 3);
    assert!(!run.record.payslip_ids.contains(&single.id));

    let fetched = service.get_run(&run.record.id).unwrap();
    assert_eq!(fetched.payslip_ids, run.record.payslip_ids);

    let relock = service.lock_run(batch[0].issued_at, "ADMIN-2").unwrap();
    assert_eq!(relock.reason, Some(GuardReason::AlreadyLocked));
}

#[test]
fn test_lock_run_without_payslips_is_invalid() {
    let state = common::app_state();
    let result = state.payslip_service.lock_run(chrono::Utc::now(), "ADMIN-1");

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn test_acknowledge_is_employee_only() {
    let state = common::app_state();
    let service = &state.payslip_service;
    let employee = MockData::employee_id();
    let payslip = service
        .issue(MockData::payslip(&employee, MockData::gross_pay()))
        .unwrap();

    service.confirm(&payslip.id).unwrap();
    service.publish(&payslip.id).unwrap();
    service.sign(&payslip.id, "sig").unwrap();
    service.confirm_paid_by_finance(&payslip.id, finance("REF-1")).unwrap();

    let other = service.acknowledge(&payslip.id, "EMP-OTHER").unwrap();
    assert_eq!(other.reason, Some(GuardReason::EmployeeMismatch));

    let own = service.acknowledge(&payslip.id, &employee).unwrap();
    assert!(own.applied);
    assert!(own.record.acknowledged_at.is_some());
    assert_eq!(
        service.get_payslips_by_status(PayslipStatus::Acknowledged).unwrap().len(),
        1
    );
}
