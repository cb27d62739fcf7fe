use tracing::{debug, trace};

use crate::{
    host::{HostEnvironment, SystemHost},
    message::{Invocation, MethodResponse},
    method::BridgeMethod,
};

// -----------------------------------------------------------------------------
// MethodCallHandler trait – anything a messenger can route calls to
// -----------------------------------------------------------------------------

/// Answers invocations arriving on one channel.
///
/// Implementations are synchronous and must answer every call; returning
/// [`MethodResponse::NotImplemented`] is the way to say "nothing here".
pub trait MethodCallHandler: Send + Sync + 'static {
    fn handle(&self, invocation: &Invocation) -> MethodResponse;
}

/// Plain functions and closures work as handlers too.
impl<F> MethodCallHandler for F
where
    F: Fn(&Invocation) -> MethodResponse + Send + Sync + 'static,
{
    fn handle(&self, invocation: &Invocation) -> MethodResponse {
        self(invocation)
    }
}

/// The dispatcher behind the `wiredash` channel.
///
/// Stateless: it only reads from its [`HostEnvironment`], so repeated calls
/// with the same method always produce the same kind of answer.
#[derive(Debug, Clone, Default)]
pub struct BridgeDispatcher<H = SystemHost> {
    host: H,
}

impl<H: HostEnvironment> BridgeDispatcher<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    fn dispatch(&self, method: BridgeMethod, _invocation: &Invocation) -> MethodResponse {
        match method {
            BridgeMethod::GetPlatformVersion => {
                MethodResponse::Value(self.host.platform_version())
            }
        }
    }
}

impl<H: HostEnvironment + 'static> MethodCallHandler for BridgeDispatcher<H> {
    fn handle(&self, invocation: &Invocation) -> MethodResponse {
        trace!(method = %invocation.method, "dispatching");
        match invocation.method.parse::<BridgeMethod>() {
            Ok(method) => self.dispatch(method, invocation),
            Err(_) => {
                debug!(method = %invocation.method, "no handler for method");
                MethodResponse::NotImplemented
            }
        }
    }
}
