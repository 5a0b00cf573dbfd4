//! `ji jobs` output specs
//!
//! Verify the line-exact job table format and the incremental query flow.

use crate::prelude::*;

use ji_core::{JobRecord, JobState, JobTable, NodeIndices};
use ji_wire::{Request, Response};

fn two_jobs() -> JobTable {
    JobTable::new(
        1700000000,
        vec![
            JobRecord::builder()
                .job_id(101)
                .state(JobState::Running)
                .priority(5)
                .name("sim")
                .nodes("n[0-3]", NodeIndices::Present(vec![0, 3]))
                .times(0x6553f100, 0)
                .procs(8, 4, 2)
                .shared(true)
                .memory(512, 1024)
                .features("gpu")
                .job_script("/home/u/sim.sh")
                .build(),
            JobRecord::builder().job_id(102).name("queued").build(),
        ],
    )
}

const TWO_JOBS: &str = "\
Jobs updated at 1700000000, record count 2
JobId=101 UserId=1000 JobState=RUNNING TimeLimit=60
Priority=5 Partition=batch
   Name=sim NodeList=n[0-3] StartTime=6553f100 EndTime=0
NodeListIndecies=0,3,-1
   ReqProcs=8 ReqNodes=4 Shared=1 Contiguous=0
MinProcs=2 MinMemory=512 MinTmpDisk=1024
   ReqNodeList= Features=gpu JobScript=/home/u/sim.sh
ReqNodeListIndecies=

JobId=102 UserId=1000 JobState=PENDING TimeLimit=60
Priority=1 Partition=batch
   Name=queued NodeList= StartTime=0 EndTime=0
NodeListIndecies=
   ReqProcs=1 ReqNodes=1 Shared=0 Contiguous=0
MinProcs=1 MinMemory=0 MinTmpDisk=0
   ReqNodeList= Features= JobScript=/bin/true
ReqNodeListIndecies=

";

#[test]
fn full_table_renders_every_record_in_order() {
    let controller = FakeController::serving(vec![Response::JobInfo(two_jobs())]);

    controller.ji().args(&["jobs"]).passes().stdout_eq(TWO_JOBS);

    assert_eq!(
        controller.requests(),
        vec![Request::JobInfo { last_update: 0 }]
    );
}

#[test]
fn empty_table_prints_summary_only() {
    let controller = FakeController::serving(vec![Response::JobInfo(JobTable::new(42, vec![]))]);

    controller
        .ji()
        .args(&["jobs"])
        .passes()
        .stdout_eq("Jobs updated at 42, record count 0\n");
}

#[test]
fn unchanged_table_reports_no_change() {
    let controller = FakeController::serving(vec![Response::ReturnCode { code: 0 }]);

    controller
        .ji()
        .args(&["jobs", "--since", "1700000000"])
        .passes()
        .stdout_eq("No changes since 1700000000\n");

    assert_eq!(
        controller.requests(),
        vec![Request::JobInfo {
            last_update: 1700000000
        }]
    );
}

#[test]
fn unchanged_table_as_json() {
    let controller = FakeController::serving(vec![Response::ReturnCode { code: 0 }]);

    controller
        .ji()
        .args(&["jobs", "--since", "7", "-o", "json"])
        .passes()
        .stdout_eq("{\"changed\":false,\"last_update\":7}\n");
}

#[test]
fn single_job_by_id() {
    let controller = FakeController::serving(vec![Response::JobInfo(two_jobs())]);

    let expected: String = TWO_JOBS.lines().skip(10).map(|l| format!("{l}\n")).collect();
    controller
        .ji()
        .args(&["jobs", "--job", "102"])
        .passes()
        .stdout_eq(&expected);
}

#[test]
fn table_as_json_keeps_node_index_terminator() {
    let controller = FakeController::serving(vec![Response::JobInfo(two_jobs())]);

    let run = controller.ji().args(&["jobs", "-o", "json"]).passes();
    let value: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(value["record_count"], 2);
    assert_eq!(value["records"][0]["node_inx"], serde_json::json!([0, 3, -1]));
    assert_eq!(value["records"][1]["node_inx"], serde_json::Value::Null);
}

#[test]
fn controller_flag_overrides_env() {
    let controller = FakeController::serving(vec![Response::ReturnCode { code: 0 }]);
    let addr = format!("unix:{}", controller.socket().display());

    cli()
        .env("JI_STATE_DIR", controller.state_dir())
        .env("JI_CONTROLLER", "unix:/nonexistent/controller.sock")
        .args(&["jobs", "--controller", &addr])
        .passes()
        .stdout_eq("No changes since 0\n");
}
