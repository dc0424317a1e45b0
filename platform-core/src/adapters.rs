//! Default call adapter and converter factories.
//!
//! The strategy assembles its factory lists from these. Internals of the
//! transport stay out of scope: everything here works against the [`Call`]
//! seam alone.

use std::sync::Arc;

use futures::channel::oneshot;
use futures::FutureExt;
use serde_json::Value;

use platform_traits::{
    AdaptedCall, Call, CallAdapter, CallAdapterFactory, CallCallback, CallError, CallbackExecutor,
    ConvertError, ConverterFactory, RawResponse, ResponseConverter, ReturnKind,
};

/// Factory for the extended asynchronous completion type.
///
/// Placed ahead of the executor-backed factory when registered, so a declared
/// future return shape is claimed here first.
pub struct CompletionCallAdapterFactory;

impl CallAdapterFactory for CompletionCallAdapterFactory {
    fn name(&self) -> &'static str {
        "completion"
    }

    fn get(&self, kind: ReturnKind) -> Option<Arc<dyn CallAdapter>> {
        matches!(kind, ReturnKind::Future)
            .then(|| Arc::new(CompletionCallAdapter) as Arc<dyn CallAdapter>)
    }
}

struct CompletionCallAdapter;

impl CallAdapter for CompletionCallAdapter {
    fn adapt(&self, call: Arc<dyn Call>) -> AdaptedCall {
        let (tx, rx) = oneshot::channel();
        call.enqueue(Box::new(move |outcome| {
            // The future may have been dropped; there is nobody to notify.
            let _ = tx.send(outcome);
        }));
        AdaptedCall::Future(
            rx.map(|received| received.unwrap_or(Err(CallError::Canceled)))
                .boxed(),
        )
    }
}

/// Factory for plain callback-style calls.
///
/// When the platform supplies a callback executor, delivered callbacks are
/// marshalled through it; otherwise the transport's completion thread invokes
/// them directly.
pub struct CallbackCallAdapterFactory {
    executor: Option<Arc<dyn CallbackExecutor>>,
}

impl CallbackCallAdapterFactory {
    pub fn new(executor: Option<Arc<dyn CallbackExecutor>>) -> Self {
        Self { executor }
    }
}

impl CallAdapterFactory for CallbackCallAdapterFactory {
    fn name(&self) -> &'static str {
        "callback"
    }

    fn get(&self, kind: ReturnKind) -> Option<Arc<dyn CallAdapter>> {
        matches!(kind, ReturnKind::Call).then(|| {
            Arc::new(CallbackCallAdapter {
                executor: self.executor.clone(),
            }) as Arc<dyn CallAdapter>
        })
    }
}

struct CallbackCallAdapter {
    executor: Option<Arc<dyn CallbackExecutor>>,
}

impl CallAdapter for CallbackCallAdapter {
    fn adapt(&self, call: Arc<dyn Call>) -> AdaptedCall {
        match &self.executor {
            Some(executor) => AdaptedCall::Call(Arc::new(MarshalledCall {
                delegate: call,
                executor: Arc::clone(executor),
            })),
            None => AdaptedCall::Call(call),
        }
    }
}

/// Call wrapper that hands every callback to the platform executor.
struct MarshalledCall {
    delegate: Arc<dyn Call>,
    executor: Arc<dyn CallbackExecutor>,
}

impl Call for MarshalledCall {
    fn enqueue(&self, callback: CallCallback) {
        let executor = Arc::clone(&self.executor);
        self.delegate.enqueue(Box::new(move |outcome| {
            executor.execute(Box::new(move || callback(outcome)));
        }));
    }
}

/// Factory for the extended optional-value wrapper.
pub struct OptionConverterFactory;

impl ConverterFactory for OptionConverterFactory {
    fn name(&self) -> &'static str {
        "option"
    }

    fn response_converter(&self, kind: ReturnKind) -> Option<Arc<dyn ResponseConverter>> {
        matches!(kind, ReturnKind::OptionalBody)
            .then(|| Arc::new(OptionConverter) as Arc<dyn ResponseConverter>)
    }
}

struct OptionConverter;

impl ResponseConverter for OptionConverter {
    fn convert(&self, response: &RawResponse) -> Result<Value, ConvertError> {
        match response.body.as_ref().filter(|body| !body.is_empty()) {
            Some(body) => Ok(serde_json::from_slice(body)?),
            None => Ok(Value::Null),
        }
    }
}
