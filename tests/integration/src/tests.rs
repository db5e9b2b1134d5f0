//! Integration tests for the DVN job engine.
//!
//! These tests exercise the contract entry points directly using
//! `cosmwasm_std::testing` mocks. Cross-contract queries (DVN to fee library,
//! fee library to price feed) are served by moving the callee's mock
//! dependencies into the caller's `MockQuerier::update_wasm` handler, so the
//! real query code of every contract runs.
//!
//! Run:
//! ```bash
//! cargo test -p dvn-integration-tests
//! ```

use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{
    coins, from_json, Addr, Binary, Deps, Env, Event, MemoryStorage, OwnedDeps, Response,
    StdResult, SystemError, SystemResult, Uint128, Uint256, WasmMsg, WasmQuery,
};
use dvn_common::oracle::{report_verification_msg, JobAssigned, JobFinalized};
use dvn_common::{JobStatus, PacketHeader, PublicKey, Role, VerificationResult};
use dvn_worker::msg::{AssignJobParam, AssignJobResponse, DstConfigParam, JobResponse};
use dvn_worker::ContractError;
use serde::de::DeserializeOwned;

type MockDeps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

// ─── Constants ───

const SRC_EID: u32 = 30101;
const DST_EID: u32 = 30106;
const FLAT_FEE: u128 = 1_000;
const DENOM: &str = "inj";
const PRICE_RATIO_PARITY: u128 = 100_000_000_000_000_000_000;

// ─── Helpers ───

fn addr(name: &str) -> Addr {
    MockApi::default().addr_make(name)
}

/// Answer smart queries addressed to `contract` by running `handler`
/// against `backing`, the callee's own mock state.
fn serve_contract<Q: DeserializeOwned + 'static>(
    querier: &mut MockQuerier,
    contract: Addr,
    backing: MockDeps,
    handler: fn(Deps, Env, Q) -> StdResult<Binary>,
) {
    let contract = contract.to_string();
    querier.update_wasm(move |query| match query {
        WasmQuery::Smart { contract_addr, msg } if *contract_addr == contract => {
            let res = from_json(msg).and_then(|q| handler(backing.as_ref(), mock_env(), q));
            SystemResult::Ok(res.into())
        }
        _ => SystemResult::Err(SystemError::InvalidRequest {
            error: "Unknown contract".to_string(),
            request: Default::default(),
        }),
    });
}

fn find_event<'a>(res: &'a Response, ty: &str) -> Option<&'a Event> {
    res.events.iter().find(|e| e.ty == ty)
}

fn header_hex(dst_eid: u32, nonce: u64) -> String {
    let mut receiver = [0u8; 32];
    receiver[12..].copy_from_slice(&[0xcd; 20]);
    let header = PacketHeader {
        nonce,
        src_eid: SRC_EID,
        sender: [0xab; 32],
        dst_eid,
        receiver,
    };
    hex::encode(header.encode())
}

fn payload_hash_hex(seed: u8) -> String {
    hex::encode([seed; 32])
}

fn assign_msg(dst_eid: u32, nonce: u64) -> dvn_worker::msg::ExecuteMsg {
    dvn_worker::msg::ExecuteMsg::AssignJob {
        param: AssignJobParam {
            dst_eid,
            packet_header_hex: header_hex(dst_eid, nonce),
            payload_hash_hex: payload_hash_hex(nonce as u8),
            confirmations: 15,
            sender: "oapp".to_string(),
        },
        options: Binary::default(),
    }
}

// ─── DVN helpers ───

fn dvn_instantiate_msg() -> dvn_worker::msg::InstantiateMsg {
    dvn_worker::msg::InstantiateMsg {
        app_id: Uint256::from(7u128),
        oracle_public_key: PublicKey {
            x: Uint256::from(99u128),
            parity: 0,
        },
        oracle_contract: addr("oracle").to_string(),
        message_libs: vec![],
        price_feed: None,
        fee_lib: None,
        default_multiplier_bps: 12_000,
        fee: Uint128::new(FLAT_FEE),
        fee_denom: DENOM.to_string(),
        dvn_config: None,
    }
}

fn setup_dvn(deps: &mut MockDeps, msg: dvn_worker::msg::InstantiateMsg) {
    let info = message_info(&addr("admin"), &[]);
    dvn_worker::contract::instantiate(deps.as_mut(), mock_env(), info, msg).unwrap();
}

fn dvn_admin(
    deps: &mut MockDeps,
    msg: dvn_worker::msg::ExecuteMsg,
) -> Result<Response, ContractError> {
    let info = message_info(&addr("admin"), &[]);
    dvn_worker::contract::execute(deps.as_mut(), mock_env(), info, msg)
}

fn set_supported(deps: &mut MockDeps, dst_eid: u32, supported: bool) {
    dvn_admin(
        deps,
        dvn_worker::msg::ExecuteMsg::SetSupportedDstChain { dst_eid, supported },
    )
    .unwrap();
}

fn grant_message_lib(deps: &mut MockDeps, lib: &Addr) {
    dvn_admin(
        deps,
        dvn_worker::msg::ExecuteMsg::GrantRole {
            role: Role::MessageLib,
            address: lib.to_string(),
        },
    )
    .unwrap();
}

fn assign(
    deps: &mut MockDeps,
    lib: &Addr,
    payment: u128,
    nonce: u64,
) -> Result<Response, ContractError> {
    let info = message_info(lib, &coins(payment, DENOM));
    dvn_worker::contract::execute(deps.as_mut(), mock_env(), info, assign_msg(DST_EID, nonce))
}

fn next_job_id(deps: &MockDeps) -> u64 {
    from_json(
        dvn_worker::contract::query(
            deps.as_ref(),
            mock_env(),
            dvn_worker::msg::QueryMsg::NextJobId {},
        )
        .unwrap(),
    )
    .unwrap()
}

fn job(deps: &MockDeps, job_id: u64) -> Option<JobResponse> {
    serde_json::from_slice(
        &dvn_worker::contract::query(
            deps.as_ref(),
            mock_env(),
            dvn_worker::msg::QueryMsg::Job { job_id },
        )
        .unwrap(),
    )
    .unwrap()
}

// ─── Price feed / fee library helpers ───

fn setup_price_feed() -> MockDeps {
    let mut deps = mock_dependencies();
    let admin = addr("admin");
    let updater = addr("updater");
    dvn_price_feed::contract::instantiate(
        deps.as_mut(),
        mock_env(),
        message_info(&admin, &[]),
        dvn_price_feed::msg::InstantiateMsg {
            updaters: vec![updater.to_string()],
            native_price_usd: Uint128::new(20_000_000_000_000_000_000),
        },
    )
    .unwrap();
    dvn_price_feed::contract::execute(
        deps.as_mut(),
        mock_env(),
        message_info(&updater, &[]),
        dvn_price_feed::msg::ExecuteMsg::SetPrice {
            prices: vec![dvn_price_feed::msg::PriceUpdate {
                dst_eid: DST_EID,
                price_ratio: Uint128::new(PRICE_RATIO_PARITY),
                gas_price_in_unit: Uint128::new(10),
                gas_per_byte: 16,
            }],
        },
    )
    .unwrap();
    deps
}

/// Fee library whose price feed queries are answered by a live price feed.
fn setup_fee_lib() -> MockDeps {
    let mut deps = mock_dependencies();
    dvn_fee_lib::contract::instantiate(
        deps.as_mut(),
        mock_env(),
        message_info(&addr("admin"), &[]),
        dvn_fee_lib::msg::InstantiateMsg {
            native_decimals_rate: Uint128::new(1_000_000_000_000_000_000),
            verify_calldata_size: 320,
        },
    )
    .unwrap();
    serve_contract(
        &mut deps.querier,
        addr("price_feed"),
        setup_price_feed(),
        dvn_price_feed::contract::query,
    );
    deps
}

/// DVN wired to fee library and price feed, with `DST_EID` supported and
/// priced at 100k gas.
fn setup_full_stack() -> MockDeps {
    let mut deps = mock_dependencies();
    let mut msg = dvn_instantiate_msg();
    msg.fee_lib = Some(addr("fee_lib").to_string());
    msg.price_feed = Some(addr("price_feed").to_string());
    msg.message_libs = vec![addr("send_lib").to_string()];
    setup_dvn(&mut deps, msg);

    serve_contract(
        &mut deps.querier,
        addr("fee_lib"),
        setup_fee_lib(),
        dvn_fee_lib::contract::query,
    );

    set_supported(&mut deps, DST_EID, true);
    dvn_admin(
        &mut deps,
        dvn_worker::msg::ExecuteMsg::SetDstConfig {
            params: vec![DstConfigParam {
                dst_eid: DST_EID,
                gas: Uint128::new(100_000),
                multiplier_bps: 0,
                floor_margin_usd: Uint128::zero(),
            }],
        },
    )
    .unwrap();
    deps
}

/// Turn the oracle's outbound callback into a DVN execute from the oracle.
fn deliver_callback(deps: &mut MockDeps, msg: WasmMsg) -> Result<Response, ContractError> {
    let WasmMsg::Execute {
        contract_addr, msg, ..
    } = msg
    else {
        panic!("expected execute message");
    };
    assert_eq!(contract_addr, addr("dvn").to_string());
    let execute_msg: dvn_worker::msg::ExecuteMsg = from_json(&msg).unwrap();
    dvn_worker::contract::execute(
        deps.as_mut(),
        mock_env(),
        message_info(&addr("oracle"), &[]),
        execute_msg,
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_unsupported_then_enabled_chain() {
    // Grant MESSAGE_LIB to A; with 30106 disabled the call fails, after
    // enabling it the same call yields job 1 and a JobAssigned event.

    let mut deps = mock_dependencies();
    setup_dvn(&mut deps, dvn_instantiate_msg());
    let lib_a = addr("lib_a");
    grant_message_lib(&mut deps, &lib_a);

    set_supported(&mut deps, DST_EID, false);
    let err = assign(&mut deps, &lib_a, FLAT_FEE, 1).unwrap_err();
    assert!(matches!(err, ContractError::UnsupportedChain { dst_eid: DST_EID }));
    assert_eq!(next_job_id(&deps), 1, "Failed attempt must not consume an id");

    set_supported(&mut deps, DST_EID, true);
    let res = assign(&mut deps, &lib_a, FLAT_FEE, 1).unwrap();

    let data: AssignJobResponse = from_json(res.data.as_ref().unwrap()).unwrap();
    assert_eq!(data.job_id, 1);

    let event = find_event(&res, dvn_common::oracle::JOB_ASSIGNED_EVENT).unwrap();
    let assigned = JobAssigned::from_event(event).unwrap();
    assert_eq!(assigned.job_id, 1);
    assert_eq!(assigned.dst_eid, DST_EID);
    assert_eq!(assigned.src_eid, SRC_EID);
    assert_eq!(assigned.confirmations, 15);
    assert_eq!(assigned.sender, "oapp");
    assert_eq!(assigned.payload_hash, payload_hash_hex(1));
    assert_eq!(assigned.receiver, format!("{}{}", "00".repeat(12), "cd".repeat(20)));
}

#[test]
fn test_distinct_callers_get_consecutive_ids() {
    let mut deps = mock_dependencies();
    setup_dvn(&mut deps, dvn_instantiate_msg());
    set_supported(&mut deps, DST_EID, true);

    let lib_a = addr("lib_a");
    let lib_b = addr("lib_b");
    grant_message_lib(&mut deps, &lib_a);
    grant_message_lib(&mut deps, &lib_b);

    let first: AssignJobResponse =
        from_json(assign(&mut deps, &lib_b, FLAT_FEE, 1).unwrap().data.unwrap()).unwrap();
    // Underpaid attempt in between does not leave a gap
    assign(&mut deps, &lib_a, FLAT_FEE - 1, 2).unwrap_err();
    let second: AssignJobResponse =
        from_json(assign(&mut deps, &lib_a, FLAT_FEE, 2).unwrap().data.unwrap()).unwrap();

    assert_eq!(first.job_id, 1);
    assert_eq!(second.job_id, 2);
    assert_eq!(job(&deps, 1).unwrap().job.origin, lib_b);
    assert_eq!(job(&deps, 2).unwrap().job.origin, lib_a);
    assert!(job(&deps, 3).is_none());
}

#[test]
fn test_fee_delegate_chain() {
    // DVN -> fee library -> price feed, every hop running its real query code.
    // remote = (100_000 gas + 320 bytes * 16) * 10 = 1_051_200 at parity,
    // then the 1.2x default multiplier applies.
    let expected_fee = 1_261_440u128;

    let mut deps = setup_full_stack();

    let preview: Uint128 = from_json(
        dvn_worker::contract::query(
            deps.as_ref(),
            mock_env(),
            dvn_worker::msg::QueryMsg::FeePreview {
                dst_eid: DST_EID,
                confirmations: 15,
                sender: "oapp".to_string(),
                options: Binary::default(),
            },
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(preview, Uint128::new(expected_fee));

    let lib = addr("send_lib");
    let err = assign(&mut deps, &lib, expected_fee - 1, 1).unwrap_err();
    match err {
        ContractError::InsufficientPayment { required, paid } => {
            assert_eq!(required, Uint128::new(expected_fee));
            assert_eq!(paid, Uint128::new(expected_fee - 1));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(next_job_id(&deps), 1);

    let res = assign(&mut deps, &lib, expected_fee, 1).unwrap();
    let data: AssignJobResponse = from_json(res.data.as_ref().unwrap()).unwrap();
    assert_eq!(data.fee, Uint128::new(expected_fee));
    assert_eq!(job(&deps, 1).unwrap().job.fee_paid, Uint128::new(expected_fee));
}

#[test]
fn test_fee_delegate_failure_blocks_assignment() {
    let mut deps = setup_full_stack();

    // Options are rejected by the fee library
    let info = message_info(&addr("send_lib"), &coins(10_000_000, DENOM));
    let mut msg = assign_msg(DST_EID, 1);
    if let dvn_worker::msg::ExecuteMsg::AssignJob { options, .. } = &mut msg {
        *options = Binary::from(vec![3u8, 1]);
    }
    let err = dvn_worker::contract::execute(deps.as_mut(), mock_env(), info, msg).unwrap_err();
    match err {
        ContractError::FeePolicyError { reason } => {
            assert!(reason.contains("unsupported options"), "{reason}")
        }
        other => panic!("unexpected error: {other}"),
    }

    // Supported on the DVN, but no price for it in the feed
    set_supported(&mut deps, 30110, true);
    dvn_admin(
        &mut deps,
        dvn_worker::msg::ExecuteMsg::SetDstConfig {
            params: vec![DstConfigParam {
                dst_eid: 30110,
                gas: Uint128::new(100_000),
                multiplier_bps: 0,
                floor_margin_usd: Uint128::zero(),
            }],
        },
    )
    .unwrap();
    let info = message_info(&addr("send_lib"), &coins(10_000_000, DENOM));
    let err = dvn_worker::contract::execute(deps.as_mut(), mock_env(), info, assign_msg(30110, 1))
        .unwrap_err();
    assert!(matches!(err, ContractError::FeePolicyError { .. }));

    assert_eq!(next_job_id(&deps), 1);
}

#[test]
fn test_oracle_round_trip() {
    // assign -> oracle observes JobAssigned -> oracle builds callback ->
    // DVN finalizes. A second report for the same job is rejected.

    let mut deps = mock_dependencies();
    setup_dvn(&mut deps, dvn_instantiate_msg());
    set_supported(&mut deps, DST_EID, true);
    let lib = addr("send_lib");
    grant_message_lib(&mut deps, &lib);

    let res = assign(&mut deps, &lib, FLAT_FEE, 4).unwrap();

    // ── Oracle side: decode the event, verify, build the callback ──
    let event = find_event(&res, dvn_common::oracle::JOB_ASSIGNED_EVENT).unwrap();
    let assigned = JobAssigned::from_event(event).unwrap();
    let header = PacketHeader::decode(&hex::decode(&assigned.packet_header).unwrap()).unwrap();
    assert_eq!(header.nonce, 4);
    assert_eq!(header.dst_eid, assigned.dst_eid);

    let callback = report_verification_msg(
        addr("dvn"),
        assigned.job_id,
        assigned.payload_hash.clone(),
        VerificationResult::Verified,
    )
    .unwrap();

    // ── DVN side ──
    let res = deliver_callback(&mut deps, callback.clone()).unwrap();
    let finalized =
        JobFinalized::from_event(find_event(&res, dvn_common::oracle::JOB_FINALIZED_EVENT).unwrap())
            .unwrap();
    assert_eq!(finalized.job_id, assigned.job_id);
    assert_eq!(finalized.status, JobStatus::Verified);

    let stored = job(&deps, assigned.job_id).unwrap();
    assert_eq!(stored.status, JobStatus::Verified);
    assert_eq!(stored.finalization.unwrap().reported_by, addr("oracle"));

    let err = deliver_callback(&mut deps, callback).unwrap_err();
    assert!(matches!(err, ContractError::AlreadyFinalized { job_id: 1 }));
}

#[test]
fn test_oracle_reports_failure_and_unknown_job() {
    let mut deps = mock_dependencies();
    setup_dvn(&mut deps, dvn_instantiate_msg());
    set_supported(&mut deps, DST_EID, true);
    let lib = addr("send_lib");
    grant_message_lib(&mut deps, &lib);
    assign(&mut deps, &lib, FLAT_FEE, 1).unwrap();

    let unknown = report_verification_msg(
        addr("dvn"),
        9,
        payload_hash_hex(1),
        VerificationResult::Verified,
    )
    .unwrap();
    let err = deliver_callback(&mut deps, unknown).unwrap_err();
    assert!(matches!(err, ContractError::UnknownJob { job_id: 9 }));

    let failed = report_verification_msg(
        addr("dvn"),
        1,
        payload_hash_hex(1),
        VerificationResult::Failed {
            reason: "signature threshold not met".to_string(),
        },
    )
    .unwrap();
    deliver_callback(&mut deps, failed).unwrap();

    let stored = job(&deps, 1).unwrap();
    assert_eq!(stored.status, JobStatus::Failed);
    assert_eq!(
        stored.finalization.unwrap().reason.as_deref(),
        Some("signature threshold not met")
    );

    // A message library cannot finalize jobs
    let err = dvn_worker::contract::execute(
        deps.as_mut(),
        mock_env(),
        message_info(&lib, &[]),
        dvn_worker::msg::ExecuteMsg::ReportVerification {
            job_id: 1,
            payload_hash_hex: payload_hash_hex(1),
            result: VerificationResult::Verified,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ContractError::Unauthorized { .. }));
}

#[test]
fn test_last_admin_cannot_be_revoked() {
    let mut deps = mock_dependencies();
    setup_dvn(&mut deps, dvn_instantiate_msg());

    let err = dvn_admin(
        &mut deps,
        dvn_worker::msg::ExecuteMsg::RevokeRole {
            role: Role::Admin,
            address: addr("admin").to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, ContractError::Unauthorized { .. }));

    // With a second admin the first one can step down
    dvn_admin(
        &mut deps,
        dvn_worker::msg::ExecuteMsg::GrantRole {
            role: Role::Admin,
            address: addr("admin2").to_string(),
        },
    )
    .unwrap();
    dvn_admin(
        &mut deps,
        dvn_worker::msg::ExecuteMsg::RevokeRole {
            role: Role::Admin,
            address: addr("admin").to_string(),
        },
    )
    .unwrap();

    let admins: Vec<String> = from_json(
        dvn_worker::contract::query(
            deps.as_ref(),
            mock_env(),
            dvn_worker::msg::QueryMsg::RoleMembers {
                role: Role::Admin,
                start_after: None,
                limit: None,
            },
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(admins, vec![addr("admin2").to_string()]);
}

#[test]
fn test_dst_config_round_trip() {
    let mut deps = mock_dependencies();
    setup_dvn(&mut deps, dvn_instantiate_msg());

    dvn_admin(
        &mut deps,
        dvn_worker::msg::ExecuteMsg::SetDstConfig {
            params: vec![DstConfigParam {
                dst_eid: 5,
                gas: Uint128::new(100_000),
                multiplier_bps: 5_000,
                floor_margin_usd: Uint128::new(77),
            }],
        },
    )
    .unwrap();

    let config: dvn_worker::state::ChainConfig = from_json(
        dvn_worker::contract::query(
            deps.as_ref(),
            mock_env(),
            dvn_worker::msg::QueryMsg::DstConfig { dst_eid: 5 },
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(config.gas, Uint128::new(100_000));
    assert_eq!(config.multiplier_bps, 5_000);
    assert_eq!(config.floor_margin_usd, Uint128::new(77));
    assert!(!config.supported, "Numeric config does not enable the chain");
}
