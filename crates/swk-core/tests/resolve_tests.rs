use swk_core::diagnostics::DiagnosticKind;
use swk_core::model::{Collector, TypeExpr};
use swk_core::parse;
use swk_core::parse::operation::HttpMethod;
use swk_core::render_model::{RenderModel, RenderOptions};
use swk_core::resolve::{analyze, analyze_all};

const SHOP_V2: &str = include_str!("fixtures/shop-v2.json");
const SHOP_V3: &str = include_str!("fixtures/shop-v3.yaml");

fn render(fields: &Collector, name: &str) -> Vec<String> {
    fields
        .get(name)
        .unwrap_or_else(|| panic!("missing declaration {name}"))
        .fields
        .iter()
        .map(|f| {
            format!(
                "{}{}: {}",
                f.name,
                if f.required { "" } else { "?" },
                f.type_expression
            )
        })
        .collect()
}

#[test]
fn v2_get_with_path_and_query() {
    let doc = parse::from_json(SHOP_V2).unwrap();
    let plan = analyze(&doc, "/shop/{itemId}/order", HttpMethod::Get).unwrap();

    assert_eq!(plan.name, "getOrder");
    assert_eq!(
        render(&plan.path_declarations, "GetOrderPathVariables"),
        vec!["itemId: number"]
    );
    assert_eq!(render(&plan.query_declarations, "GetOrderQuery"), vec!["page?: number"]);

    assert_eq!(
        plan.response_declarations.names(),
        vec!["Category", "Item", "Order", "OrderPage", "Result"]
    );
    assert_eq!(plan.response_type, Some(TypeExpr::Named("Result".into())));
    assert_eq!(
        render(&plan.response_declarations, "Order"),
        vec![
            "id?: number",
            "state?: number",
            "channel?: string",
            "createdAt?: string",
            "gift?: boolean",
            "item?: Item",
        ]
    );
    assert_eq!(
        render(&plan.response_declarations, "Category"),
        vec!["name?: string", "parent?: Category", "children?: Category[]"]
    );
    assert_eq!(
        plan.diagnostics.of_kind(DiagnosticKind::IgnoredProperty).count(),
        1
    );
}

#[test]
fn v2_array_body_marks_required() {
    let doc = parse::from_json(SHOP_V2).unwrap();
    let plan = analyze(&doc, "/shop/{itemId}/order", HttpMethod::Post).unwrap();

    assert_eq!(plan.name, "placeOrders");
    assert_eq!(
        plan.body_type.as_ref().map(ToString::to_string).as_deref(),
        Some("Order[]")
    );
    assert_eq!(plan.body_declarations.names(), vec!["Category", "Item", "Order"]);
    let order = render(&plan.body_declarations, "Order");
    assert!(order.contains(&"id: number".to_string()));
    assert!(order.contains(&"item: Item".to_string()));
    assert!(order.contains(&"state?: number".to_string()));
    assert_eq!(plan.query_type_name, None);
}

#[test]
fn v2_operations_without_bodies() {
    let doc = parse::from_json(SHOP_V2).unwrap();

    let list = analyze(&doc, "/shop/items", HttpMethod::Get).unwrap();
    assert_eq!(list.name, "listItems");
    assert_eq!(
        render(&list.query_declarations, "ListItemsQuery"),
        vec!["keyword?: string", "ids?: number[]"]
    );
    assert_eq!(
        list.response_type.as_ref().map(ToString::to_string).as_deref(),
        Some("Item[]")
    );

    let remove = analyze(&doc, "/shop/categories/{category-id}", HttpMethod::Delete).unwrap();
    assert_eq!(remove.name, "removeCategory");
    assert_eq!(
        render(&remove.path_declarations, "RemoveCategoryPathVariables"),
        vec!["category-id: string"]
    );
    assert_eq!(remove.response_type, None);
    assert!(remove.response_declarations.is_empty());

    assert_eq!(analyze_all(&doc).len(), 5);
}

#[test]
fn v3_path_level_parameters_and_request_body() {
    let doc = parse::from_yaml(SHOP_V3).unwrap();

    let show = analyze(&doc, "/pets/{petId}", HttpMethod::Get).unwrap();
    assert_eq!(show.name, "showPetById");
    assert_eq!(
        render(&show.path_declarations, "ShowPetByIdPathVariables"),
        vec!["petId: string"]
    );
    assert_eq!(
        render(&show.query_declarations, "ShowPetByIdQuery"),
        vec!["fields?: string[]"]
    );
    assert_eq!(show.response_declarations.names(), vec!["Owner", "Pet"]);
    assert_eq!(
        render(&show.response_declarations, "Pet"),
        vec![
            "id?: number",
            "name?: string",
            "status?: string",
            "owner?: Owner",
            "nickname?: string",
        ]
    );

    let update = analyze(&doc, "/pets/{petId}", HttpMethod::Put).unwrap();
    assert_eq!(update.body_type, Some(TypeExpr::Named("Pet".into())));
    let pet = render(&update.body_declarations, "Pet");
    assert_eq!(&pet[..2], &["id: number".to_string(), "name: string".to_string()]);
}

#[test]
fn v3_route_name_and_shared_parameter() {
    let doc = parse::from_yaml(SHOP_V3).unwrap();
    let list = analyze(&doc, "/pets", HttpMethod::Get).unwrap();
    assert_eq!(list.name, "listPets");
    assert_eq!(list.query_type_name, None);
    assert_eq!(
        list.response_type.as_ref().map(ToString::to_string).as_deref(),
        Some("Pet[]")
    );
    assert_eq!(
        list.diagnostics.of_kind(DiagnosticKind::IgnoredParameter).count(),
        1
    );
}

#[test]
fn render_model_uses_document_base_path() {
    let doc = parse::from_json(SHOP_V2).unwrap();
    let options = RenderOptions::for_document(&doc, None);

    let plan = analyze(&doc, "/shop/{itemId}/order", HttpMethod::Get).unwrap();
    let model = RenderModel::from_plan(&plan, &options);
    assert_eq!(
        model.url_expression,
        "`/shop-api/shop/${pathVariables.itemId}/order`"
    );
    assert_eq!(model.method_literal, "\"get\"");
    assert_eq!(model.comment.as_deref(), Some("Order of an item"));

    let plan = analyze(&doc, "/shop/categories/{category-id}", HttpMethod::Delete).unwrap();
    let model = RenderModel::from_plan(&plan, &options);
    assert_eq!(
        model.url_expression,
        "`/shop-api/shop/categories/${pathVariables[\"category-id\"]}`"
    );

    let plan = analyze(&doc, "/shop/items", HttpMethod::Get).unwrap();
    let model = RenderModel::from_plan(&plan, &options);
    assert_eq!(model.url_expression, "\"/shop-api/shop/items\"");
}
