//! Front-end bridge: the operations any user interface calls.
//!
//! Every function here delegates to the [`SessionController`] and wraps the
//! outcome in a [`CommandResult`], so a front end (the interactive console,
//! the one-shot CLI, or a GUI) gets the same shape back every time:
//! `{ success, data, message }`, where `message` is ready to show to the
//! operator as-is.
//!
//! # Data Transfer Objects
//!
//! [`EndpointDto`] carries the endpoint as two plain strings, matching the
//! two text fields the operator edits.  Sending strings in both directions
//! keeps validation in one place: the controller.

pub mod console;

use eos_core::EndpointConfig;
use serde::Serialize;

use crate::application::session::SessionController;

/// Message shown after a configuration update is accepted.
pub const CONFIG_UPDATED_MESSAGE: &str = "Configuration updated successfully.";

/// The endpoint as displayed in, and read back from, the input fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointDto {
    pub ip: String,
    pub port: String,
}

impl From<EndpointConfig> for EndpointDto {
    fn from(endpoint: EndpointConfig) -> Self {
        Self {
            ip: endpoint.address().to_string(),
            port: endpoint.port().to_string(),
        }
    }
}

/// Unified response wrapper returned to front ends.
#[derive(Debug, Serialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
        }
    }
}

/// Returns the active endpoint, e.g. to prefill the input fields.
pub fn get_endpoint(controller: &SessionController) -> CommandResult<EndpointDto> {
    let endpoint = controller.endpoint();
    CommandResult::ok(EndpointDto::from(endpoint), format!("GO target is {endpoint}"))
}

/// Applies operator-entered address and port.
pub fn update_endpoint(
    controller: &SessionController,
    ip: &str,
    port: &str,
) -> CommandResult<EndpointDto> {
    match controller.apply_configuration(ip, port) {
        Ok(endpoint) => CommandResult::ok(EndpointDto::from(endpoint), CONFIG_UPDATED_MESSAGE),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Presses GO once.  `data` is the endpoint the datagram went to.
pub fn send_go(controller: &SessionController) -> CommandResult<EndpointDto> {
    match controller.send_command() {
        Ok(target) => CommandResult::ok(EndpointDto::from(target), format!("GO sent to {target}")),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::network::mock::RecordingTransportFactory;
    use crate::infrastructure::storage::config::{MockConfigStore, RawEndpointRecord};

    fn make_controller() -> (SessionController, RecordingTransportFactory) {
        let mut store = MockConfigStore::new();
        store.expect_load().return_const(RawEndpointRecord::default());
        store.expect_save().returning(|_| Ok(()));
        let factory = RecordingTransportFactory::new();
        let controller =
            SessionController::start(Box::new(store), Box::new(factory.clone())).expect("start");
        (controller, factory)
    }

    #[test]
    fn test_get_endpoint_returns_default_strings() {
        // Arrange
        let (controller, _factory) = make_controller();

        // Act
        let result = get_endpoint(&controller);

        // Assert
        assert!(result.success);
        assert_eq!(
            result.data.unwrap(),
            EndpointDto {
                ip: "127.0.0.1".to_string(),
                port: "8000".to_string()
            }
        );
    }

    #[test]
    fn test_get_endpoint_reports_default_in_effect_for_invalid_stored_record() {
        // Arrange
        let mut store = MockConfigStore::new();
        store.expect_load().return_const(RawEndpointRecord {
            ip: "bad-ip".to_string(),
            port: "9000".to_string(),
        });
        let controller =
            SessionController::start(Box::new(store), Box::new(RecordingTransportFactory::new()))
                .expect("start");

        // Act
        let result = get_endpoint(&controller);

        // Assert
        assert_eq!(result.message, "GO target is 127.0.0.1:8000");
    }

    #[test]
    fn test_update_endpoint_success_message() {
        let (controller, _factory) = make_controller();

        let result = update_endpoint(&controller, "10.0.0.5", "9000");

        assert!(result.success);
        assert_eq!(result.message, CONFIG_UPDATED_MESSAGE);
        assert_eq!(result.data.unwrap().port, "9000");
    }

    #[test]
    fn test_update_endpoint_failure_carries_validation_message() {
        let (controller, _factory) = make_controller();

        let result = update_endpoint(&controller, "10.0.0.5", "70000");

        assert!(!result.success);
        assert!(result.data.is_none());
        assert_eq!(result.message, "port must be between 1 and 65535, got 70000");
    }

    #[test]
    fn test_send_go_reports_target() {
        let (controller, factory) = make_controller();

        let result = send_go(&controller);

        assert!(result.success);
        assert_eq!(result.message, "GO sent to 127.0.0.1:8000");
        assert_eq!(factory.sent().len(), 1);
    }

    #[test]
    fn test_send_go_message_names_the_datagram_target() {
        // Arrange
        let (controller, factory) = make_controller();
        update_endpoint(&controller, "10.0.0.5", "9000");

        // Act
        let result = send_go(&controller);

        // Assert: message, data and the recorded datagram agree.
        let target = factory.sent().last().expect("a datagram was sent").target;
        assert_eq!(result.message, format!("GO sent to {target}"));
        assert_eq!(
            result.data.unwrap(),
            EndpointDto {
                ip: "10.0.0.5".to_string(),
                port: "9000".to_string()
            }
        );
    }

    #[test]
    fn test_send_go_failure_is_not_success() {
        let (controller, factory) = make_controller();
        factory.set_fail_sends(true);

        let result = send_go(&controller);

        assert!(!result.success);
        assert!(result.message.starts_with("failed to send GO to 127.0.0.1:8000"));
    }

    #[test]
    fn test_command_result_serializes_to_uniform_shape() {
        let ok = serde_json::to_value(CommandResult::ok(1u8, "fine")).unwrap();
        assert_eq!(ok, serde_json::json!({"success": true, "data": 1, "message": "fine"}));

        let err = serde_json::to_value(CommandResult::<u8>::err("broken")).unwrap();
        assert_eq!(
            err,
            serde_json::json!({"success": false, "data": null, "message": "broken"})
        );
    }

    #[test]
    fn test_endpoint_dto_from_ipv6_endpoint_has_bare_address() {
        let dto = EndpointDto::from(EndpointConfig::parse("::1", "8000").unwrap());
        assert_eq!(dto.ip, "::1");
    }
}
