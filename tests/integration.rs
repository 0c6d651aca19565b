use assert_cmd::Command;
use predicates::boolean::PredicateBooleanExt;
use predicates::str::contains;

const BINARY_NAME: &str = "chessrules";

#[test]
fn plays_fools_mate() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("move f2f3\nmove e7e5\nmove g2g4\nmove d8h4\nstatus\nquit\n")
            .assert()
            .success()
            .stdout(
                contains("chessrules")
                    .and(contains("ok ongoing"))
                    .and(contains("ok checkmate"))
                    .and(contains("\ncheckmate\n")),
            ),
    );
}

#[test]
fn reports_errors_and_continues() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("move e2e5\nfoo\nmoves e2\n")
            .assert()
            .success()
            .stdout(
                contains("error: illegal move: e2e5")
                    .and(contains("error: unknown command \"foo\""))
                    .and(contains("e2e3 e2e4")),
            ),
    );
}

#[test]
fn starts_from_fen() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");
    let _ = cmd.args(["--fen", "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"]);

    drop(
        cmd.write_stdin("status\nmoves\n")
            .assert()
            .success()
            .stdout(contains("stalemate")),
    );
}

#[test]
fn rejects_invalid_fen() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");
    let _ = cmd.args(["--fen", "8/8/8/8/8/8/8/8 w - - 0 1"]);

    drop(cmd.assert().failure());
}
