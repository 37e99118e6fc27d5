use payloads::APIClient;
use yew::prelude::*;
use yew_router::prelude::*;

pub mod components;
pub mod hooks;
pub mod logs;
pub mod pages;
pub mod time;

use hooks::ResponseCache;
use pages::ImplantationSuiviPage;

/// Backend used when `BACKEND_URL` is not set at build time.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

// Global API client - configurable via environment at build time
pub fn get_api_client() -> APIClient {
    APIClient::new(option_env!("BACKEND_URL").unwrap_or(DEFAULT_BACKEND_URL))
}

#[function_component]
pub fn App() -> Html {
    // One cache for the whole app; every use_api below shares it
    let cache = use_state(ResponseCache::default);

    html! {
        <ContextProvider<ResponseCache> context={(*cache).clone()}>
            <BrowserRouter>
                <div class="min-h-screen bg-white dark:bg-gray-900 text-gray-900 dark:text-gray-100 transition-colors">
                    <Switch<Route> render={switch} />
                </div>
            </BrowserRouter>
        </ContextProvider<ResponseCache>>
    }
}

#[derive(Clone, Routable, PartialEq)]
enum Route {
    #[at("/")]
    Home,
    #[at("/implantation-suivi")]
    ImplantationSuivi,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Redirect<Route> to={Route::ImplantationSuivi} /> },
        Route::ImplantationSuivi => html! {
            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <ImplantationSuiviPage />
            </main>
        },
        Route::NotFound => html! {
            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <div class="text-center">
                    <h1 class="text-4xl font-bold text-gray-900 dark:text-white">{"404"}</h1>
                    <p class="text-gray-600 dark:text-gray-300">{"Page not found"}</p>
                </div>
            </main>
        },
    }
}
