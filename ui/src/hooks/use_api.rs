use payloads::ApiError;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::rc::Rc;
use yew::functional::UseForceUpdateHandle;
use yew::prelude::*;

use super::cache::ResponseCache;
use super::fetch::{ApiOptions, FetchController, RequestTicket, fetch};
use crate::get_api_client;

/// What `use_api` hands back to the component.
pub struct ApiHookReturn<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<ApiError>,
    pub refetch: Callback<()>,
}

impl<T> ApiHookReturn<T> {
    /// Render based on fetch state with contextual loading/error messages.
    ///
    /// The render function receives the data along with whether a refetch
    /// is in progress and the error from a failed refetch, if any. Data from
    /// the previous fetch is still passed in that case.
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&T, bool, Option<&ApiError>) -> Html,
    {
        match self.data.as_ref() {
            Some(data) => render_fn(data, self.loading, self.error.as_ref()),
            None if self.loading => html! {
                <div class="text-center py-12">
                    <p class="text-neutral-600 dark:text-neutral-400">
                        {format!("Loading {}...", context)}
                    </p>
                </div>
            },
            None => match &self.error {
                Some(error) => html! {
                    <div class="p-4 rounded-md bg-red-50 \
                               dark:bg-red-900/20 border \
                               border-red-200 dark:border-red-800">
                        <p class="text-sm text-red-700 dark:text-red-400">
                            {format!("Error loading {}: {}", context, error)}
                        </p>
                    </div>
                },
                None => html! {
                    <div class="text-center py-12">
                        <p class="text-neutral-600 dark:text-neutral-400">
                            {format!("No {} found", context)}
                        </p>
                    </div>
                },
            },
        }
    }
}

/// Fetch `path` from the backend and keep the result in component state.
///
/// A new request goes out on mount, whenever `path` changes, and on every
/// `refetch`. With `options.cache`, a response younger than
/// `options.cache_time` in the `ResponseCache` from context is used instead
/// of a request, in the same render. Responses to a path that has since been
/// replaced are dropped.
///
/// `path` should only change when the query does: it is the cache key.
///
/// # Example
///
/// ```ignore
/// let page = use_api::<Paginated<ImplantationSuivi>>(
///     ListQuery::new(10, 0).path(resources::IMPLANTATION_SUIVI),
///     ApiOptions::cached(),
/// );
/// ```
#[hook]
pub fn use_api<T>(path: String, options: ApiOptions) -> ApiHookReturn<T>
where
    T: Clone + DeserializeOwned + 'static,
{
    let cache = use_context::<ResponseCache>();
    let force_update = use_force_update();
    let controller = use_mut_ref(move || {
        if options.cache && cache.is_none() {
            tracing::warn!(
                "use_api: caching requested without a ResponseCache \
                 provider, responses will not be cached"
            );
        }
        FetchController::<T>::new(options, cache)
    });
    let pending = use_mut_ref(|| None::<RequestTicket>);

    // Load during render so a cached response shows up without a loading
    // frame. The request itself is sent from the effect below.
    let ticket = controller.borrow_mut().load(&path);
    if ticket.is_some() {
        *pending.borrow_mut() = ticket;
    }

    {
        let controller = controller.clone();
        let pending = pending.clone();
        let force_update = force_update.clone();

        use_effect_with(path, move |_| {
            let ticket = pending.borrow_mut().take();
            if let Some(ticket) = ticket {
                dispatch(controller, ticket, force_update);
            }
        });
    }

    {
        let controller = controller.clone();
        use_effect_with((), move |_| {
            move || controller.borrow_mut().dispose()
        });
    }

    let refetch = {
        let controller = controller.clone();
        Callback::from(move |_| {
            let ticket = controller.borrow_mut().refetch();
            if let Some(ticket) = ticket {
                force_update.force_update();
                dispatch(controller.clone(), ticket, force_update.clone());
            }
        })
    };

    let state = controller.borrow().state().clone();
    ApiHookReturn {
        data: state.data,
        loading: state.loading,
        error: state.error,
        refetch,
    }
}

fn dispatch<T>(
    controller: Rc<RefCell<FetchController<T>>>,
    ticket: RequestTicket,
    force_update: UseForceUpdateHandle,
) where
    T: Clone + DeserializeOwned + 'static,
{
    let client = get_api_client();
    yew::platform::spawn_local(async move {
        let result = fetch::<T>(&client, &ticket).await;
        let applied = controller.borrow_mut().resolve(&ticket, result);
        if applied {
            force_update.force_update();
        }
    });
}
