use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::core::app_state::AppState;
use crate::portfolio::navigator::{ActiveSection, NavigateToSection, SectionId};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication with the host page.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Read-only view of the app that request handlers answer from.
#[derive(Debug, Clone, Copy)]
pub struct RpcContext {
    pub stage: AppState,
    pub active_section: SectionId,
}

/// Result of dispatching one request.
#[derive(Debug, Default)]
pub struct RpcOutcome {
    pub response: Option<RpcResponse>,
    pub navigate: Option<SectionId>,
}

/// Plugin establishing the postMessage bridge for iframe deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::{Arc, Mutex};

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        let Ok(data) = event.data().dyn_into::<js_sys::JsString>() else {
            return;
        };
        let message_str: String = data.into();

        if message_str.contains("jsonrpc") {
            if let Ok(mut queue) = queue_clone.lock() {
                queue.push(message_str);
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, host bridge disabled");
        return;
    };

    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // The listener lives for the whole page, so JS takes ownership.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping the queue the JS listener pushes raw messages into.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    stage: Res<State<AppState>>,
    active_section: Res<ActiveSection>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut navigate_events: EventWriter<NavigateToSection>,
) {
    let context = RpcContext {
        stage: *stage.get(),
        active_section: active_section.current,
    };

    for event in events.read() {
        let outcome = handle_raw_message(&event.content, &context);

        if let Some(section) = outcome.navigate {
            navigate_events.write(NavigateToSection { section });
        }
        if let Some(response) = outcome.response {
            rpc_interface.queue_response(response);
        }
    }
}

/// Parse and dispatch one raw message from the host page.
pub fn handle_raw_message(content: &str, context: &RpcContext) -> RpcOutcome {
    match serde_json::from_str::<RpcRequest>(content) {
        Ok(request) => handle_rpc_request(&request, context),
        Err(parse_error) => {
            warn!("Discarding malformed RPC message: {}", parse_error);
            RpcOutcome::default()
        }
    }
}

/// Handle individual RPC request and generate response based on method.
pub fn handle_rpc_request(request: &RpcRequest, context: &RpcContext) -> RpcOutcome {
    // Notifications from the host carry no id and get no response.
    let Some(id) = request.id.clone() else {
        debug!("Ignoring RPC notification '{}'", request.method);
        return RpcOutcome::default();
    };

    if request.jsonrpc != "2.0" {
        return RpcOutcome {
            response: Some(create_error_response(
                id,
                RpcError::invalid_request("Expected jsonrpc \"2.0\""),
            )),
            navigate: None,
        };
    }

    let mut navigate = None;
    let result = match request.method.as_str() {
        "get_stage" => handle_get_stage(context),
        "get_active_section" => handle_get_active_section(context),
        "navigate_to_section" => {
            handle_navigate_to_section(&request.params, context).map(|section| {
                navigate = Some(section);
                serde_json::json!({
                    "success": true,
                    "section": section.as_str()
                })
            })
        }
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            Err(RpcError::method_not_found(&request.method))
        }
    };

    let response = match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => create_error_response(id, error),
    };

    RpcOutcome {
        response: Some(response),
        navigate,
    }
}

fn handle_get_stage(context: &RpcContext) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "stage": context.stage.as_str()
    }))
}

fn handle_get_active_section(context: &RpcContext) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "section": context.active_section.as_str()
    }))
}

/// Validate a navigation request; the caller dispatches the scroll.
fn handle_navigate_to_section(
    params: &serde_json::Value,
    context: &RpcContext,
) -> Result<SectionId, RpcError> {
    #[derive(Deserialize)]
    struct NavigateParams {
        section: String,
    }

    let nav_params = serde_json::from_value::<NavigateParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'section' parameter"))?;

    let section = SectionId::from_string(&nav_params.section).ok_or_else(|| {
        RpcError::invalid_params(&format!("Unknown section: {}", nav_params.section))
    })?;

    if context.stage != AppState::Portfolio {
        return Err(RpcError::invalid_request("Portfolio is not showing yet"));
    }

    info!("Host page requested section {:?}", section);
    Ok(section)
}

fn create_error_response(id: serde_json::Value, error: RpcError) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(error),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        let json = match serde_json::to_string(message) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize message: {}", e);
                return;
            }
        };

        let Some(window) = window() else {
            error!("Window object not available");
            return;
        };

        // Running top-level (no iframe) is normal; there is simply no listener.
        let Some(parent) = window.parent().ok().flatten() else {
            return;
        };

        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
            error!("Failed to send message to parent: {:?}", e);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_request(message: &str) -> Self {
        Self {
            code: -32600,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(stage: AppState) -> RpcContext {
        RpcContext {
            stage,
            active_section: SectionId::Skills,
        }
    }

    fn request(method: &str, params: serde_json::Value) -> String {
        serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 7
        })
        .to_string()
    }

    #[test]
    fn get_stage_reports_current_stage() {
        let outcome = handle_raw_message(
            &request("get_stage", serde_json::Value::Null),
            &context(AppState::Gate),
        );
        let response = outcome.response.expect("request with id gets a response");
        assert_eq!(response.id, Some(serde_json::json!(7)));
        assert_eq!(response.result, Some(serde_json::json!({ "stage": "gate" })));
        assert!(response.error.is_none());
    }

    #[test]
    fn get_active_section_uses_lowercase_ids() {
        let outcome = handle_raw_message(
            &request("get_active_section", serde_json::Value::Null),
            &context(AppState::Portfolio),
        );
        let result = outcome.response.and_then(|r| r.result);
        assert_eq!(result, Some(serde_json::json!({ "section": "skills" })));
    }

    #[test]
    fn navigate_dispatches_only_in_portfolio_stage() {
        let message = request(
            "navigate_to_section",
            serde_json::json!({ "section": "contact" }),
        );

        let outcome = handle_raw_message(&message, &context(AppState::Portfolio));
        assert_eq!(outcome.navigate, Some(SectionId::Contact));

        let outcome = handle_raw_message(&message, &context(AppState::Gate));
        assert_eq!(outcome.navigate, None);
        let error = outcome.response.and_then(|r| r.error).expect("error response");
        assert_eq!(error.code, -32600);
    }

    #[test]
    fn navigate_rejects_bad_params() {
        let missing = handle_raw_message(
            &request("navigate_to_section", serde_json::json!({})),
            &context(AppState::Portfolio),
        );
        let error = missing.response.and_then(|r| r.error).expect("error response");
        assert_eq!(error.code, -32602);

        let unknown = handle_raw_message(
            &request("navigate_to_section", serde_json::json!({ "section": "blog" })),
            &context(AppState::Portfolio),
        );
        assert!(unknown.navigate.is_none());
        let error = unknown.response.and_then(|r| r.error).expect("error response");
        assert_eq!(error.code, -32602);
        assert!(error.message.contains("blog"));
    }

    #[test]
    fn unknown_method_is_reported() {
        let outcome = handle_raw_message(
            &request("launch_rocket", serde_json::Value::Null),
            &context(AppState::Portfolio),
        );
        let error = outcome.response.and_then(|r| r.error).expect("error response");
        assert_eq!(error, RpcError::method_not_found("launch_rocket"));
    }

    #[test]
    fn notifications_and_garbage_get_no_response() {
        let notification = serde_json::json!({
            "jsonrpc": "2.0",
            "method": "get_stage",
            "params": null
        })
        .to_string();
        assert!(
            handle_raw_message(&notification, &context(AppState::Boot))
                .response
                .is_none()
        );
        assert!(
            handle_raw_message("{\"jsonrpc\": oops", &context(AppState::Boot))
                .response
                .is_none()
        );
    }

    #[test]
    fn wrong_protocol_version_is_invalid_request() {
        let message = serde_json::json!({
            "jsonrpc": "1.0",
            "method": "get_stage",
            "id": "a"
        })
        .to_string();
        let outcome = handle_raw_message(&message, &context(AppState::Boot));
        let error = outcome.response.and_then(|r| r.error).expect("error response");
        assert_eq!(error.code, -32600);
    }

    #[test]
    fn frame_rate_is_not_exposed() {
        let outcome = handle_raw_message(
            &request("get_fps", serde_json::Value::Null),
            &context(AppState::Portfolio),
        );
        let error = outcome.response.and_then(|r| r.error).expect("error response");
        assert_eq!(error, RpcError::method_not_found("get_fps"));
    }

    #[test]
    fn error_response_omits_result_when_serialized() {
        let response = create_error_response(serde_json::json!(1), RpcError::internal_error("x"));
        let json = serde_json::to_value(&response).expect("serializable");
        assert!(json.get("result").is_none());
        assert_eq!(json["error"]["code"], serde_json::json!(-32603));
    }
}
