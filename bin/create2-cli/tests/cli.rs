//! Argument parsing and command execution of the `create2` CLI.

use alloy_primitives::{address, b256, bytes};
use clap::Parser;
use create2_cli::{common::CliError, MainCmd};
use create2_devchain::simple_storage_init_code;
use create2_verify::{
    predict_address, salt_from_u64,
    transcript::{read_entries, TranscriptOutcome},
    DeriveError, FailureKind, InputField, VerifyError,
};
use rstest::rstest;

fn parse(args: &[&str]) -> MainCmd {
    MainCmd::try_parse_from(std::iter::once("create2").chain(args.iter().copied())).unwrap()
}

fn predict_cmd(args: &[&str]) -> create2_cli::predict::Cmd {
    match parse(args) {
        MainCmd::Predict(cmd) => cmd,
        other => panic!("expected predict, got {other:?}"),
    }
}

fn verify_cmd(args: &[&str]) -> create2_cli::verify::Cmd {
    match parse(args) {
        MainCmd::Verify(cmd) => cmd,
        other => panic!("expected verify, got {other:?}"),
    }
}

#[test]
fn test_predict_eip1014_example() {
    let cmd = predict_cmd(&[
        "predict",
        "--deployer",
        "0xdeadbeef00000000000000000000000000000000",
        "--salt",
        "0x000000000000000000000000feed000000000000000000000000000000000000",
        "--init-code",
        "0x00",
    ]);

    let prediction = cmd.predict().unwrap();

    assert_eq!(prediction.predicted, address!("D04116cDd17beBE565EB2422F2497E06cC1C9833"));
    assert_eq!(
        prediction.salt,
        b256!("000000000000000000000000feed000000000000000000000000000000000000")
    );
}

#[test]
fn test_predict_defaults_to_factory() {
    let cmd = predict_cmd(&["predict", "--salt", "12345", "--init-code", "0x6080604052"]);

    let prediction = cmd.predict().unwrap();

    assert_eq!(prediction.deployer, address!("4e59b44847b379578588920ca78fbf26c0b4956c"));
    assert_eq!(
        prediction.predicted,
        predict_address(prediction.deployer, salt_from_u64(12345), &bytes!("6080604052"))
    );
}

#[test]
fn test_predict_reads_init_code_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("init.hex");
    std::fs::write(&path, "0x6080604052\n").unwrap();

    let cmd = predict_cmd(&["predict", "--salt", "1", "--init-code-file", path.to_str().unwrap()]);

    assert_eq!(
        cmd.predict().unwrap().init_code_hash,
        create2_verify::init_code_hash(&bytes!("6080604052"))
    );
}

#[test]
fn test_predict_requires_init_code() {
    let cmd = predict_cmd(&["predict", "--salt", "1"]);
    assert!(matches!(cmd.predict(), Err(CliError::InvalidInput(_))));
}

#[rstest]
#[case::short("0xdeadbeef000000000000000000000000000000", 19)]
#[case::long("0xdeadbeef0000000000000000000000000000000000", 21)]
fn test_predict_rejects_deployer_width(#[case] deployer: &str, #[case] len: usize) {
    let cmd = predict_cmd(&["predict", "--deployer", deployer, "--salt", "1", "--init-code", "00"]);

    let err = cmd.predict().unwrap_err();

    assert!(matches!(
        err,
        CliError::InvalidLength(DeriveError::InvalidInputLength {
            field: InputField::Deployer,
            expected: 20,
            actual,
        }) if actual == len
    ));
}

#[test]
fn test_init_code_sources_conflict() {
    let err = MainCmd::try_parse_from([
        "create2",
        "predict",
        "--salt",
        "1",
        "--init-code",
        "00",
        "--init-code-file",
        "code.hex",
    ])
    .unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
}

#[test]
fn test_salt_is_required() {
    assert!(MainCmd::try_parse_from(["create2", "verify"]).is_err());
}

#[test]
fn test_verbosity_is_counted() {
    let cmd = parse(&["verify", "--salt", "1", "-vvv"]);
    assert_eq!(cmd.log_args().verbose, 3);
}

#[tokio::test]
async fn test_verify_storage_contract() {
    let cmd = verify_cmd(&["verify", "--salt", "12345"]);

    let result = cmd.verify().await.unwrap().unwrap();

    assert!(result.is_match());
    assert_eq!(
        result.actual(),
        predict_address(
            address!("4e59b44847b379578588920ca78fbf26c0b4956c"),
            salt_from_u64(12345),
            &simple_storage_init_code()
        )
    );
    cmd.run().await.unwrap();
}

#[tokio::test]
async fn test_verify_wrong_deployer_fails() {
    let cmd = verify_cmd(&[
        "verify",
        "--salt",
        "12345",
        "--deployer",
        "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
    ]);

    let result = cmd.verify().await.unwrap().unwrap();
    assert_eq!(result.failure(), Some(FailureKind::AddressMismatch));

    let err = cmd.run().await.unwrap_err();
    assert!(matches!(err, CliError::Verify(VerifyError::AddressMismatch { .. })));
}

#[tokio::test]
async fn test_verify_reverting_init_code_fails() {
    let cmd = verify_cmd(&["verify", "--salt", "1", "--init-code", "0x60006000fd", "--json"]);

    let err = cmd.run().await.unwrap_err();

    assert!(matches!(err, CliError::Verify(err) if err.kind() == FailureKind::Chain));
}

#[tokio::test]
async fn test_verify_writes_transcript() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.jsonl");
    let cmd = verify_cmd(&[
        "verify",
        "--salt",
        "7",
        "--timeout",
        "10000",
        "--transcript",
        path.to_str().unwrap(),
    ]);

    cmd.run().await.unwrap();

    let entries = read_entries(std::io::BufReader::new(std::fs::File::open(&path).unwrap())).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].salt, salt_from_u64(7));
    assert!(matches!(&entries[0].outcome, TranscriptOutcome::Verified { result } if result.is_match()));
}
