/*
 * Typed form of the calls arriving over the method channel and of the replies
 * sent back. Arguments arrive as JSON-shaped values; decoding them into
 * `MethodCall` up front means the executor never has to probe maps for keys.
 */
use crate::error::{PlatformError, Result as PlatformResult};
use crate::types::{TitleBarStyle, WindowId};
use serde::Deserialize;
use serde_json::{Value as JsonValue, json};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(
    tag = "method",
    content = "args",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum MethodCall {
    // Window registry
    CreateWindow(Option<String>),
    Show(WindowId),
    Hide(WindowId),
    Close(WindowId),
    SetFrame {
        window_id: WindowId,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },
    Center(WindowId),
    SetTitle {
        window_id: WindowId,
        title: String,
    },
    GetAllSubWindowIds,

    // Screens
    GetAttachedScreenList,
    EnsureScreenInitialized,

    // Screen manager
    SetFullScreen {
        is_full_screen: bool,
    },
    IsFullScreen,
    GetBounds {
        device_pixel_ratio: f64,
    },
    SetBounds {
        device_pixel_ratio: f64,
        x: Option<f64>,
        y: Option<f64>,
        width: Option<f64>,
        height: Option<f64>,
    },
    WaitUntilReadyToShow,
    IsMaximized,
    Maximize {
        #[serde(default)]
        vertically: bool,
    },
    SetAsFrameless,
    SetTitleBarStyle {
        title_bar_style: TitleBarStyle,
    },
    IsResizable,
    SetResizable {
        is_resizable: bool,
    },
    IsAlwaysOnTop,
    SetAlwaysOnTop {
        is_always_on_top: bool,
    },
    IsSkipTaskbar,
    SetSkipTaskbar {
        is_skip_taskbar: bool,
    },
    IsClosable,
    SetClosable {
        is_closable: bool,
    },
    Destroy,
}

/// Channel names of every method `MethodCall` understands.
pub const METHOD_NAMES: &[&str] = &[
    "createWindow",
    "show",
    "hide",
    "close",
    "setFrame",
    "center",
    "setTitle",
    "getAllSubWindowIds",
    "getAttachedScreenList",
    "ensureScreenInitialized",
    "setFullScreen",
    "isFullScreen",
    "getBounds",
    "setBounds",
    "waitUntilReadyToShow",
    "isMaximized",
    "maximize",
    "setAsFrameless",
    "setTitleBarStyle",
    "isResizable",
    "setResizable",
    "isAlwaysOnTop",
    "setAlwaysOnTop",
    "isSkipTaskbar",
    "setSkipTaskbar",
    "isClosable",
    "setClosable",
    "destroy",
];

/// Methods without arguments. Whatever payload the host sends with them is ignored.
const UNIT_METHOD_NAMES: &[&str] = &[
    "getAllSubWindowIds",
    "getAttachedScreenList",
    "ensureScreenInitialized",
    "isFullScreen",
    "waitUntilReadyToShow",
    "isMaximized",
    "setAsFrameless",
    "isResizable",
    "isAlwaysOnTop",
    "isSkipTaskbar",
    "isClosable",
    "destroy",
];

impl MethodCall {
    pub fn is_known(method: &str) -> bool {
        METHOD_NAMES.contains(&method)
    }

    /// Decodes a call. Unknown methods yield `NotImplemented`, malformed
    /// arguments `InvalidArguments`.
    pub fn parse(method: &str, args: &JsonValue) -> PlatformResult<MethodCall> {
        if !Self::is_known(method) {
            return Err(PlatformError::NotImplemented(method.to_string()));
        }
        let args = if UNIT_METHOD_NAMES.contains(&method) {
            &JsonValue::Null
        } else {
            args
        };
        let request = json!({ "method": method, "args": args });
        serde_json::from_value(request)
            .map_err(|e| PlatformError::InvalidArguments(format!("{method}: {e}")))
    }
}

/// Outcome of a method call, mirroring the channel's three reply kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodReply {
    Success(JsonValue),
    Error { code: String, message: String },
    NotImplemented,
}

impl MethodReply {
    pub fn from_result(result: PlatformResult<JsonValue>) -> Self {
        match result {
            Ok(value) => MethodReply::Success(value),
            Err(PlatformError::NotImplemented(_)) => MethodReply::NotImplemented,
            Err(error) => MethodReply::Error {
                code: error.code().to_string(),
                message: error.to_string(),
            },
        }
    }

    /// JSON envelope: `{"result": ..}`, `{"error": {"code", "message"}}` or
    /// `{"notImplemented": true}`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            MethodReply::Success(value) => json!({ "result": value }),
            MethodReply::Error { code, message } => {
                json!({ "error": { "code": code, "message": message } })
            }
            MethodReply::NotImplemented => json!({ "notImplemented": true }),
        }
    }
}
