use crate::model::{
    Action, AddColumnInput, AddEndpointInput, AddProcessorInput, AddSubgraphInput, Id,
    LinkSubgraphToProcessorInput, PageDataArchitectureDocument,
};
use crate::store::traits::Store;
use anyhow::Result;

pub const SEED_DOCUMENT_ID: &str = "sample-storefront";

fn endpoint(id: &str, title: &str, url_path: &str, description: &str) -> Action {
    Action::add_endpoint(AddEndpointInput {
        id: id.to_string(),
        title: title.to_string(),
        url_path: url_path.to_string(),
        description: Some(description.to_string()),
        comments: None,
    })
}

fn processor(endpoint_id: &str, id: &str, name: &str, table_name: &str) -> Action {
    Action::add_processor(AddProcessorInput {
        endpoint_id: endpoint_id.to_string(),
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        table_name: table_name.to_string(),
    })
}

/// Column helper; `references` is "table.column" for foreign keys
fn column(
    endpoint_id: &str,
    processor_id: &str,
    id: &str,
    name: &str,
    data_type: &str,
    is_primary_key: bool,
    references: Option<&str>,
) -> Action {
    Action::add_column(AddColumnInput {
        endpoint_id: endpoint_id.to_string(),
        processor_id: processor_id.to_string(),
        id: id.to_string(),
        name: name.to_string(),
        data_type: data_type.to_string(),
        is_primary_key,
        is_nullable: !is_primary_key && references.is_none(),
        default_value: if is_primary_key {
            Some("gen_random_uuid()".to_string())
        } else {
            None
        },
        references: references.map(str::to_string),
    })
}

fn subgraph(endpoint_id: &str, id: &str, name: &str, schema: &str, query: &str) -> Action {
    Action::add_subgraph(AddSubgraphInput {
        endpoint_id: endpoint_id.to_string(),
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        graphql_schema: schema.to_string(),
        graphql_query: query.to_string(),
    })
}

fn link(endpoint_id: &str, subgraph_id: &str, processor_id: &str) -> Action {
    Action::link_subgraph_to_processor(LinkSubgraphToProcessorInput {
        endpoint_id: endpoint_id.to_string(),
        subgraph_id: subgraph_id.to_string(),
        processor_id: processor_id.to_string(),
    })
}

/// Actions describing a small storefront: a product listing page and an order history page
pub fn seed_actions() -> Vec<Action> {
    vec![
        endpoint("products", "Products", "/products", "Product catalog listing"),
        processor("products", "products-table", "Products", "products"),
        column("products", "products-table", "products-id", "id", "uuid", true, None),
        column("products", "products-table", "products-name", "name", "text", false, None),
        column("products", "products-table", "products-price", "price_cents", "integer", false, None),
        subgraph(
            "products",
            "products-subgraph",
            "Products",
            "type Product { id: ID! name: String price: Int }\ntype Query { products: [Product!]! }",
            "query Products { products { id name price } }",
        ),
        link("products", "products-subgraph", "products-table"),
        endpoint("orders", "Order history", "/account/orders", "Orders placed by the signed-in customer"),
        processor("orders", "orders-table", "Orders", "orders"),
        column("orders", "orders-table", "orders-id", "id", "uuid", true, None),
        column("orders", "orders-table", "orders-customer", "customer_id", "uuid", false, Some("customers.id")),
        column("orders", "orders-table", "orders-placed", "placed_at", "timestamptz", false, None),
        processor("orders", "order-items-table", "Order items", "order_items"),
        column("orders", "order-items-table", "order-items-id", "id", "uuid", true, None),
        column("orders", "order-items-table", "order-items-order", "order_id", "uuid", false, Some("orders.id")),
        subgraph(
            "orders",
            "orders-subgraph",
            "Orders",
            "type Order { id: ID! placedAt: String items: [OrderItem!]! }\ntype OrderItem { id: ID! }\ntype Query { orders: [Order!]! }",
            "query Orders { orders { id placedAt items { id } } }",
        ),
        link("orders", "orders-subgraph", "orders-table"),
        link("orders", "orders-subgraph", "order-items-table"),
    ]
}

/// Build the sample document by dispatching the seed actions
pub fn seed_document() -> Result<PageDataArchitectureDocument> {
    let mut document = PageDataArchitectureDocument::with_state(
        SEED_DOCUMENT_ID.to_string(),
        "Sample storefront",
        Default::default(),
    );
    document.dispatch_all(seed_actions())?;
    Ok(document)
}

pub async fn load_seed_data<S: Store>(store: &S) -> Result<Id> {
    let id: Id = SEED_DOCUMENT_ID.to_string();
    let document = seed_document()?;
    let operations = document.operations.len();

    if store.insert_document(document).await? {
        log::info!("seeded document {} with {} operations", id, operations);
    } else {
        log::info!("seed document {} already present", id);
    }
    Ok(id)
}
