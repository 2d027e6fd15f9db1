//! Inbound job records
//!
//! The server streams one job record per target as each execution finishes.
//! Every field is defaulted on decode: the job id is the only thing that marks
//! a frame as a job, and the classifier checks it explicitly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Output captured from a finished job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobResult {
    pub stdout: String,
    pub stderr: String,
}

/// One execution of a dispatched command on a single client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRecord {
    /// Job identifier; empty means the frame is not a job
    pub jid: String,
    /// Server-assigned status such as `running`, `successful` or `failed`
    pub status: String,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub client_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    pub command: String,
    pub cwd: String,
    pub pid: Option<u32>,
    pub created_by: String,
    /// Correlates the jobs of one multi-client dispatch
    pub multi_job_id: String,
    pub timeout_sec: u32,
    pub error: String,
    pub result: JobResult,
    pub is_sudo: bool,
    pub is_script: bool,
    pub interpreter: String,
}

impl JobRecord {
    /// Whether the record carries a job identifier
    pub fn has_id(&self) -> bool {
        !self.jid.is_empty()
    }

    /// Client name when known, otherwise the client id
    pub fn client_label(&self) -> &str {
        self.client_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.client_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_record() {
        let json = r#"{
            "jid": "f0a5c2d1",
            "status": "successful",
            "started_at": "2021-01-01T10:00:00Z",
            "finished_at": "2021-01-01T10:00:02Z",
            "client_id": "123",
            "client_name": "web-1",
            "command": "ls",
            "cwd": "/root",
            "pid": 42,
            "created_by": "admin",
            "multi_job_id": "m-1",
            "timeout_sec": 30,
            "error": "",
            "result": {"stdout": "a\nb\n", "stderr": ""},
            "is_sudo": false,
            "is_script": false,
            "interpreter": "/bin/sh"
        }"#;

        let job: JobRecord = serde_json::from_str(json).unwrap();
        assert!(job.has_id());
        assert_eq!(job.status, "successful");
        assert_eq!(job.pid, Some(42));
        assert_eq!(job.result.stdout, "a\nb\n");
        assert_eq!(job.client_label(), "web-1");
        assert_eq!(
            job.started_at.unwrap().to_rfc3339(),
            "2021-01-01T10:00:00+00:00"
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let job: JobRecord = serde_json::from_str(r#"{"client_id":"7"}"#).unwrap();
        assert!(!job.has_id());
        assert_eq!(job.finished_at, None);
        assert_eq!(job.client_label(), "7");
    }

    #[test]
    fn test_null_timestamps_accepted() {
        let job: JobRecord =
            serde_json::from_str(r#"{"jid":"1","status":"running","finished_at":null}"#).unwrap();
        assert_eq!(job.status, "running");
        assert!(job.finished_at.is_none());
    }
}
