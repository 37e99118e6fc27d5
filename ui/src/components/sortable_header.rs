use payloads::SortDirection;
use yew::prelude::*;

use crate::hooks::SortState;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub label: AttrValue,
    /// Backend field name sent as `ordering`
    pub column: AttrValue,
    pub sort: SortState,
    pub on_sort: Callback<String>,
}

/// Table header cell that toggles sorting on its column when clicked.
#[function_component]
pub fn SortableHeader(props: &Props) -> Html {
    let onclick = {
        let column = props.column.to_string();
        props.on_sort.reform(move |_: MouseEvent| column.clone())
    };

    let indicator = match props.sort.column() {
        Some(column) if column == props.column.as_str() => {
            match props.sort.direction() {
                SortDirection::Asc => " ▲",
                SortDirection::Desc => " ▼",
            }
        }
        _ => "",
    };

    html! {
        <th
            {onclick}
            class="px-4 py-2 text-left text-xs font-medium uppercase \
                   tracking-wider text-neutral-600 dark:text-neutral-400 \
                   cursor-pointer select-none"
        >
            {format!("{}{}", props.label, indicator)}
        </th>
    }
}
