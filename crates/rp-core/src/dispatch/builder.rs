//! Execution request assembly

use rp_protocol::{ExecPayload, ExecutionRequest};

use crate::config::keys;
use crate::config::ConfigView;
use crate::error::RequestError;

/// Split a comma separated id list, dropping blanks
pub fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

/// Build the request for already resolved targets
///
/// A script body takes precedence over a command line. Group ids are attached
/// only when given; a non-positive or oversized timeout falls back to the
/// default. Fails without targets or without anything to run.
pub fn build_request<P: ConfigView + ?Sized>(
    client_ids: Vec<String>,
    params: &P,
) -> Result<ExecutionRequest, RequestError> {
    if client_ids.is_empty() {
        return Err(RequestError::NoClientIds);
    }

    let script = params.read_string(keys::SCRIPT, "");
    let command = params.read_string(keys::COMMAND, "");
    let payload = if !script.trim().is_empty() {
        ExecPayload::Script(script)
    } else if !command.trim().is_empty() {
        ExecPayload::Command(command)
    } else {
        return Err(RequestError::EmptyPayload);
    };

    let timeout = params.read_int(keys::TIMEOUT, keys::DEFAULT_CMD_TIMEOUT_SECONDS);
    let timeout = u32::try_from(timeout).unwrap_or(0);

    let mut request = ExecutionRequest::new(client_ids, payload)
        .with_timeout(timeout)
        .with_cwd(params.read_string(keys::CWD, ""))
        .with_interpreter(params.read_string(keys::INTERPRETER, ""))
        .sudo(params.read_bool(keys::IS_SUDO, false))
        .concurrently(params.read_bool(keys::EXEC_CONCURRENTLY, false))
        .abort_on_error(params.read_bool(keys::ABORT_ON_ERROR, false));

    let group_ids = split_ids(&params.read_string(keys::GROUP_IDS, ""));
    if !group_ids.is_empty() {
        request = request.with_group_ids(group_ids);
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParameterBag;
    use rp_protocol::DEFAULT_TIMEOUT_SECS;

    #[test]
    fn test_split_ids() {
        assert_eq!(split_ids("1, 2,,3,"), vec!["1", "2", "3"]);
        assert!(split_ids("").is_empty());
        assert!(split_ids(" , ").is_empty());
    }

    #[test]
    fn test_command_request() {
        let params = ParameterBag::from_values([
            (keys::COMMAND, "cmd"),
            (keys::GROUP_IDS, "333"),
            (keys::TIMEOUT, "1"),
            (keys::EXEC_CONCURRENTLY, "1"),
        ]);

        let request = build_request(vec!["1235".to_string()], &params).unwrap();

        assert_eq!(request.client_ids(), ["1235"]);
        assert_eq!(request.group_ids(), Some(&["333".to_string()][..]));
        assert_eq!(request.payload(), &ExecPayload::Command("cmd".to_string()));
        assert_eq!(request.timeout_sec(), 1);
        assert!(request.is_concurrent());
        assert!(!request.is_sudo());
        assert!(!request.aborts_on_error());
    }

    #[test]
    fn test_script_takes_precedence() {
        let params = ParameterBag::from_values([
            (keys::COMMAND, "ls"),
            (keys::SCRIPT, "bHMgLWxh"),
            (keys::INTERPRETER, "tacoscript"),
            (keys::CWD, "/var"),
            (keys::IS_SUDO, "true"),
            (keys::ABORT_ON_ERROR, "yes"),
        ]);

        let request = build_request(vec!["1".to_string()], &params).unwrap();

        assert_eq!(request.payload(), &ExecPayload::Script("bHMgLWxh".to_string()));
        assert_eq!(request.interpreter(), Some("tacoscript"));
        assert_eq!(request.cwd(), Some("/var"));
        assert!(request.is_sudo());
        assert!(request.aborts_on_error());
    }

    #[test]
    fn test_defaults() {
        let params = ParameterBag::from_values([(keys::COMMAND, "uptime")]);
        let request = build_request(vec!["1".to_string()], &params).unwrap();

        assert_eq!(request.group_ids(), None);
        assert_eq!(request.cwd(), None);
        assert_eq!(request.interpreter(), None);
        assert_eq!(request.timeout_sec(), DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_negative_timeout_uses_default() {
        let params = ParameterBag::from_values([(keys::COMMAND, "ls"), (keys::TIMEOUT, "-5")]);
        let request = build_request(vec!["1".to_string()], &params).unwrap();
        assert_eq!(request.timeout_sec(), DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_blank_group_ids_are_omitted() {
        let params = ParameterBag::from_values([(keys::COMMAND, "ls"), (keys::GROUP_IDS, " , ")]);
        let request = build_request(vec!["1".to_string()], &params).unwrap();
        assert_eq!(request.group_ids(), None);
    }

    #[test]
    fn test_no_client_ids() {
        let params = ParameterBag::from_values([(keys::CLIENT_IDS, ","), (keys::COMMAND, "ls")]);
        let err = build_request(split_ids(","), &params).unwrap_err();
        assert_eq!(err, RequestError::NoClientIds);
    }

    #[test]
    fn test_empty_command() {
        let params = ParameterBag::from_values([(keys::COMMAND, "")]);
        let err = build_request(vec!["1".to_string()], &params).unwrap_err();
        assert_eq!(err, RequestError::EmptyPayload);

        let params = ParameterBag::from_values([(keys::COMMAND, "   ")]);
        let err = build_request(vec!["1".to_string()], &params).unwrap_err();
        assert_eq!(err, RequestError::EmptyPayload);
    }

    #[test]
    fn test_blank_script_falls_back_to_command() {
        let params = ParameterBag::from_values([(keys::SCRIPT, " "), (keys::COMMAND, "uptime")]);
        let request = build_request(vec!["1".to_string()], &params).unwrap();
        assert_eq!(request.payload(), &ExecPayload::Command("uptime".to_string()));
    }
}
