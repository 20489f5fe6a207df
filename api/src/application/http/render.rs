//! HTML fragments swapped in by htmx on the upload page.

use menujudge_core::domain::menu::entities::{AnalysisResult, Dish, FlavorLevel};

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn level_meter(level: FlavorLevel, icon: &str, label: &str, filled_class: &str) -> String {
    let dots = (FlavorLevel::MIN..=FlavorLevel::MAX)
        .map(|i| {
            let class = if i <= level.value() {
                filled_class
            } else {
                "bg-slate-600"
            };
            format!(r#"<span class="w-2 h-2 rounded-full {class}"></span>"#)
        })
        .collect::<String>();

    format!(
        r#"<div class="flex items-center gap-2" title="{label} {value}/{max}"><span>{icon}</span><div class="flex gap-1">{dots}</div></div>"#,
        value = level.value(),
        max = FlavorLevel::MAX,
    )
}

pub fn render_dish_card(dish: &Dish) -> String {
    let price = dish
        .price_range
        .map(|p| {
            format!(
                r#"<span class="text-sm font-semibold text-emerald-400">{}</span>"#,
                html_escape(p.symbol())
            )
        })
        .unwrap_or_default();

    let ingredients = if dish.ingredients.is_empty() {
        String::new()
    } else {
        let tags = dish
            .ingredients
            .iter()
            .map(|i| {
                format!(
                    r#"<span class="px-2 py-0.5 text-xs rounded-full bg-slate-700 text-slate-200">{}</span>"#,
                    html_escape(i)
                )
            })
            .collect::<String>();
        format!(r#"<div class="flex flex-wrap gap-1 mt-3">{tags}</div>"#)
    };

    let allergens = if dish.allergens.is_empty() {
        String::new()
    } else {
        format!(
            r#"<p class="mt-3 text-xs text-amber-400">⚠️ Allergens: {}</p>"#,
            html_escape(&dish.allergens.join(", "))
        )
    };

    format!(
        r#"<article class="dish-card bg-surface rounded-xl shadow-lg hover:shadow-xl transition-all border border-slate-700 hover:border-primary p-5">
<div class="flex items-start justify-between gap-3">
<div>
<h3 class="text-lg font-bold text-slate-100">{translated}</h3>
<p class="text-sm text-slate-400">{original}</p>
</div>
<div class="flex flex-col items-end gap-1">
<span class="px-2 py-0.5 text-xs uppercase rounded bg-primary/20 text-primary">{category}</span>
{price}
</div>
</div>
<p class="mt-3 text-sm text-slate-300">{description}</p>
<div class="flex gap-6 mt-3">
{spiciness}
{sweetness}
</div>
{ingredients}
{allergens}
</article>"#,
        translated = html_escape(&dish.translated_name),
        original = html_escape(&dish.original_name),
        category = dish.category.as_str(),
        description = html_escape(&dish.description),
        spiciness = level_meter(dish.spiciness, "🌶️", "Spiciness", "bg-red-500"),
        sweetness = level_meter(dish.sweetness, "🍯", "Sweetness", "bg-amber-500"),
    )
}

pub fn render_dish_list(result: &AnalysisResult) -> String {
    let cards = result
        .dishes
        .iter()
        .map(render_dish_card)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<section id="dish-list" data-analysis-id="{id}">
<p class="mb-4 text-sm text-slate-400">{count} dishes found by {provider} ({model}) in {seconds:.2}s</p>
<div class="grid gap-4 md:grid-cols-2">
{cards}
</div>
</section>"#,
        id = result.analysis_id,
        count = result.dishes.len(),
        provider = result.provider,
        model = html_escape(&result.model),
        seconds = result.processing_time,
    )
}

/// Error partial, `code` omitted when there is none to show.
pub fn render_error(title: &str, message: &str, code: Option<&str>) -> String {
    let code_line = code
        .filter(|c| !c.is_empty())
        .map(|c| {
            format!(
                r#"<p class="mt-2 text-xs text-red-400/70">Error code: {}</p>"#,
                html_escape(c)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div id="error-message" role="alert" class="bg-red-500/10 border border-red-500/30 rounded-lg p-4 animate-shake">
<div class="flex items-start gap-3">
<span class="text-red-500 text-xl">⚠️</span>
<div class="flex-grow">
<h3 class="font-semibold text-red-400">{title}</h3>
<p class="mt-1 text-sm text-slate-300">{message}</p>
{code_line}
</div>
<button type="button" class="text-red-400 hover:text-red-300" onclick="document.getElementById('error-message').remove()">Close</button>
</div>
</div>"#,
        title = html_escape(title),
        message = html_escape(message),
    )
}
