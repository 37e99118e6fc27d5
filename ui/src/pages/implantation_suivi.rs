use payloads::{
    ApiError, ListQuery, Paginated,
    responses::{ImplantationSuivi, ZoneOccupation, resources},
};
use yew::prelude::*;

use crate::components::{PaginationControls, SortableHeader};
use crate::hooks::{
    ApiOptions, FilterValue, list_path, use_api, use_filters, use_pagination,
    use_sorting,
};

const PAGE_SIZE: u64 = 10;
const ZONE_FILTER: &str = "zone_id";

/// Zone occupation follow-up: which client occupies how much of which zone.
#[function_component]
pub fn ImplantationSuiviPage() -> Html {
    let pagination = use_pagination(PAGE_SIZE);
    let sorting = use_sorting();
    let filters = use_filters();

    let path = list_path(
        resources::IMPLANTATION_SUIVI,
        &pagination.state(),
        &sorting.state(),
        &filters.filters,
    );
    let rows =
        use_api::<Paginated<ImplantationSuivi>>(path, ApiOptions::cached());
    let zones = use_api::<Paginated<ZoneOccupation>>(
        ListQuery::new(100, 0).path(resources::ZONE_OCCUPATION),
        ApiOptions::cached(),
    );

    // Any change to sorting or filters starts over on the first page
    let on_sort = {
        let toggle_sorting = sorting.toggle_sorting.clone();
        let go_to_page = pagination.go_to_page.clone();
        Callback::from(move |column: String| {
            toggle_sorting.emit(column);
            go_to_page.emit(1);
        })
    };

    let on_zone_change = {
        let update_filters = filters.update_filters.clone();
        let go_to_page = pagination.go_to_page.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            let zone = select.value().parse::<i64>().ok().map(FilterValue::Number);
            update_filters.emit((ZONE_FILTER.to_string(), zone));
            go_to_page.emit(1);
        })
    };

    let on_clear = {
        let clear_filters = filters.clear_filters.clone();
        let go_to_page = pagination.go_to_page.clone();
        Callback::from(move |_: MouseEvent| {
            clear_filters.emit(());
            go_to_page.emit(1);
        })
    };

    let on_retry = rows.refetch.reform(|_: MouseEvent| ());

    let selected_zone = filters.filters.get(ZONE_FILTER).map(|v| v.to_string());
    let zone_options = zones
        .data
        .as_ref()
        .map(|zones| {
            zones
                .results
                .iter()
                .map(|zone| {
                    let value = zone.zone_id.to_string();
                    let selected = selected_zone.as_deref() == Some(value.as_str());
                    html! {
                        <option {value} {selected}>{zone.zone.clone()}</option>
                    }
                })
                .collect::<Html>()
        })
        .unwrap_or_default();

    let sort_state = sorting.state();
    let header = |label: &'static str, column: &'static str| {
        html! {
            <SortableHeader
                {label}
                {column}
                sort={sort_state.clone()}
                on_sort={on_sort.clone()}
            />
        }
    };

    let current_page = pagination.current_page;
    let on_page_change = pagination.go_to_page.clone();

    html! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-semibold">{"Implantation follow-up"}</h1>
                <div class="flex items-center gap-2">
                    <select
                        onchange={on_zone_change}
                        class="border border-neutral-300 dark:border-neutral-600 \
                               rounded-md text-sm px-2 py-1 \
                               bg-white dark:bg-neutral-800"
                    >
                        <option value="" selected={selected_zone.is_none()}>
                            {"All zones"}
                        </option>
                        {zone_options}
                    </select>
                    <button
                        onclick={on_clear}
                        disabled={filters.filters.is_empty()}
                        class="text-sm text-neutral-600 dark:text-neutral-400 \
                               hover:underline"
                    >
                        {"Clear filters"}
                    </button>
                </div>
            </div>

            {rows.render("implantation follow-up", |page, is_loading, error| html! {
                <div>
                    {error_banner(error, on_retry.clone())}
                    <table class="min-w-full divide-y divide-neutral-200 \
                                  dark:divide-neutral-700">
                        <thead>
                            <tr>
                                {header("Zone", "zone")}
                                {header("Client", "client")}
                                {header("Surface (m²)", "surface_m2")}
                                {header("Occupation", "occupation_rate")}
                                {header("Since", "start_date")}
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-neutral-100 \
                                      dark:divide-neutral-800">
                            {for page.results.iter().map(row)}
                        </tbody>
                    </table>
                    <PaginationControls
                        {current_page}
                        total_pages={page.total_pages(PAGE_SIZE)}
                        on_page_change={on_page_change.clone()}
                        {is_loading}
                    />
                </div>
            })}
        </div>
    }
}

fn row(row: &ImplantationSuivi) -> Html {
    html! {
        <tr key={row.id.to_string()}>
            <td class="px-4 py-2">{row.zone.clone()}</td>
            <td class="px-4 py-2">{row.client.clone()}</td>
            <td class="px-4 py-2 text-right">{row.surface_m2.round_dp(2).to_string()}</td>
            <td class="px-4 py-2 text-right">
                {format!("{}%", row.occupation_rate.round_dp(1))}
            </td>
            <td class="px-4 py-2">{row.start_date.to_string()}</td>
        </tr>
    }
}

/// Shown above data kept from an earlier fetch when a refresh failed.
fn error_banner(error: Option<&ApiError>, on_retry: Callback<MouseEvent>) -> Html {
    let Some(error) = error else {
        return html! {};
    };
    html! {
        <div class="mb-4 p-3 rounded-md bg-red-50 dark:bg-red-900/20 \
                    border border-red-200 dark:border-red-800 \
                    flex items-center justify-between">
            <p class="text-sm text-red-700 dark:text-red-400">
                {format!("Could not refresh: {}", error)}
            </p>
            <button onclick={on_retry} class="text-sm font-medium underline">
                {"Retry"}
            </button>
        </div>
    }
}
