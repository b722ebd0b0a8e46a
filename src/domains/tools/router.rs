//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Every descriptor gets one dynamic route that forwards to the shared
//! [`ToolDispatcher`].

use std::sync::Arc;

use futures::FutureExt;
use rmcp::ErrorData as McpError;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter};

use super::descriptor::ToolDescriptor;
use super::dispatcher::ToolDispatcher;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(dispatcher: Arc<ToolDispatcher>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    dispatcher
        .list_tools()
        .iter()
        .fold(ToolRouter::new(), |router, descriptor| {
            router.with_route(create_route(descriptor, dispatcher.clone()))
        })
}

fn create_route<S>(descriptor: &ToolDescriptor, dispatcher: Arc<ToolDispatcher>) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    let name = descriptor.name;
    ToolRoute::new_dyn(descriptor.to_tool(), move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let dispatcher = dispatcher.clone();
        async move {
            let envelope = dispatcher.invoke(name, &args).await;
            Ok::<_, McpError>(envelope.into_call_tool_result())
        }
        .boxed()
    })
}
