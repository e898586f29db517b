use bigdecimal::BigDecimal;
use paycore::database::models::{
    CappedDeductionInput, DeductionInput, FinanceConfirmationInput, LoanStatus, PaymentMethod,
    SkipReason,
};
use pretty_assertions::assert_eq;

mod common;
use common::MockData;

fn deduction(payslip_id: &str, amount: i64) -> DeductionInput {
    DeductionInput {
        payslip_id: payslip_id.to_string(),
        amount: BigDecimal::from(amount),
    }
}

#[test]
fn test_loan_settles_after_three_deductions() {
    common::setup_test_env();
    let state = common::app_state();
    let service = &state.loan_service;
    let loan = service
        .create_loan(MockData::loan(&MockData::employee_id(), 6000, 2000))
        .unwrap();

    for payslip in ["PSL-00000001", "PSL-00000002", "PSL-00000003"] {
        service.record_deduction(&loan.id, deduction(payslip, 2000)).unwrap();
    }

    let loan = service.get(&loan.id).unwrap();
    assert_eq!(loan.remaining_balance, BigDecimal::from(0));
    assert_eq!(loan.status, LoanStatus::Settled);
    assert_eq!(loan.deductions.len(), 3);
}

#[test]
fn test_cap_holds_when_monthly_and_balance_exceed_it() {
    let state = common::app_state();
    let service = &state.loan_service;
    let loan = service
        .create_loan(MockData::loan(&MockData::employee_id(), 50000, 8000))
        .unwrap();

    for i in 0..5 {
        let net_pay = MockData::gross_pay();
        let cap = net_pay.clone() * BigDecimal::from(30) / BigDecimal::from(100);
        let result = service
            .record_capped_deduction(
                &loan.id,
                CappedDeductionInput {
                    payslip_id: format!("PSL-{}", i),
                    employee_net_pay: net_pay,
                },
            )
            .unwrap();

        assert!(result.deducted <= cap);
        assert!(result.remaining_balance >= BigDecimal::from(0));
    }
}

#[test]
fn test_frozen_loan_resumes_after_unfreeze() {
    let state = common::app_state();
    let service = &state.loan_service;
    let loan = service
        .create_loan(MockData::loan(&MockData::employee_id(), 6000, 2000))
        .unwrap();

    service.freeze(&loan.id).unwrap();
    let skipped = service
        .record_capped_deduction(
            &loan.id,
            CappedDeductionInput {
                payslip_id: "PSL-1".to_string(),
                employee_net_pay: BigDecimal::from(30000),
            },
        )
        .unwrap();
    assert_eq!(skipped.reason, Some(SkipReason::Frozen));

    // Unfreezing an active loan afterwards is a quiet no-op
    assert!(service.unfreeze(&loan.id).unwrap().applied);
    assert!(!service.unfreeze(&loan.id).unwrap().applied);

    let resumed = service
        .record_capped_deduction(
            &loan.id,
            CappedDeductionInput {
                payslip_id: "PSL-2".to_string(),
                employee_net_pay: BigDecimal::from(30000),
            },
        )
        .unwrap();
    assert_eq!(resumed.deducted, BigDecimal::from(2000));
    assert_eq!(resumed.remaining_balance, BigDecimal::from(4000));
}

#[test]
fn test_payroll_run_feeds_capped_deduction() {
    let state = common::app_state();
    let employee = MockData::employee_id();

    let loan = state
        .loan_service
        .create_loan(MockData::loan(&employee, 10000, 5000))
        .unwrap();
    let payslip = state
        .payslip_service
        .issue(MockData::payslip(&employee, BigDecimal::from(12000)))
        .unwrap();
    state.payslip_service.confirm(&payslip.id).unwrap();
    state.payslip_service.publish(&payslip.id).unwrap();
    let paid = state
        .payslip_service
        .confirm_paid_by_finance(
            &payslip.id,
            FinanceConfirmationInput {
                confirmed_by: "FIN-1".to_string(),
                payment_method: PaymentMethod::BankTransfer,
                bank_reference_id: Some("REF-1".to_string()),
            },
        )
        .unwrap()
        .record;

    // Net 12000 - 2100 statutory = 9900; 30% of that is 2970
    let result = state
        .loan_service
        .record_capped_deduction(
            &loan.id,
            CappedDeductionInput {
                payslip_id: paid.id.clone(),
                employee_net_pay: paid.net_pay.clone(),
            },
        )
        .unwrap();
    assert_eq!(result.deducted, BigDecimal::from(2970));

    let repeat = state
        .loan_service
        .record_capped_deduction(
            &loan.id,
            CappedDeductionInput {
                payslip_id: paid.id.clone(),
                employee_net_pay: paid.net_pay,
            },
        )
        .unwrap();
    assert_eq!(repeat.reason, Some(SkipReason::AlreadyDeducted));

    let deductions = state.loan_service.get_all_deductions().unwrap();
    assert_eq!(deductions.len(), 1);
    assert_eq!(deductions[0].employee_id, employee);
    assert_eq!(deductions[0].deduction.payslip_id, paid.id);
}

#[test]
fn test_schedule_never_exceeds_principal() {
    let state = common::app_state();
    let service = &state.loan_service;
    let loan = service
        .create_loan(MockData::loan(&MockData::employee_id(), 7001, 1000))
        .unwrap();

    let schedule = service.generate_schedule(&loan.id).unwrap();
    let total = schedule
        .iter()
        .fold(BigDecimal::from(0), |acc, i| acc + &i.amount);

    assert_eq!(schedule.len(), 8);
    assert_eq!(schedule[7].amount, BigDecimal::from(1));
    assert_eq!(total, BigDecimal::from(7001));
    assert!(schedule.windows(2).all(|w| w[0].due_date < w[1].due_date));
}

#[test]
fn test_balance_history_tracks_each_step() {
    let state = common::app_state();
    let service = &state.loan_service;
    let loan = service
        .create_loan(MockData::loan(&MockData::employee_id(), 3000, 1000))
        .unwrap();

    service.record_deduction(&loan.id, deduction("PSL-1", 1000)).unwrap();
    service.record_deduction(&loan.id, deduction("PSL-2", 2500)).unwrap();

    let history = service.get_balance_history(&loan.id).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].previous_balance, BigDecimal::from(3000));
    assert_eq!(history[0].new_balance, BigDecimal::from(2000));
    assert_eq!(history[1].deduction_amount, BigDecimal::from(2000));
    assert_eq!(history[1].new_balance, BigDecimal::from(0));
}
