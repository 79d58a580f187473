//! End-to-end flows: use cases over an in-memory repository, filtering with
//! specifications and shaping output with mappers.

use std::sync::Arc;

use async_trait::async_trait;
use patternkit_core::{DomainError, DomainResult, EntityId, Patch, Record, UseCase};
use patternkit_mapper::{Mapper, PropertyMapper};
use patternkit_repository::{Criteria, InMemoryRepository, QueryParams, Repository};
use patternkit_specification::{Field, Specification, SpecificationBuilder};

#[derive(Debug, Clone, PartialEq)]
struct Product {
    sku: String,
    price: u32,
    stock: u32,
    status: Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Active,
    Archived,
}

#[derive(Debug, Default)]
struct ProductPatch {
    price: Option<u32>,
    stock: Option<u32>,
    status: Option<Status>,
}

impl Patch<Product> for ProductPatch {
    fn apply_to(self, target: &mut Product) {
        if let Some(price) = self.price {
            target.price = price;
        }
        if let Some(stock) = self.stock {
            target.stock = stock;
        }
        if let Some(status) = self.status {
            target.status = status;
        }
    }
}

type Products = InMemoryRepository<Product, ProductPatch>;

#[derive(Debug, Default, PartialEq)]
struct ProductListing {
    id: String,
    sku: String,
    price: String,
}

fn sku() -> Field<Record<Product>, String> {
    Field::new("sku", |r: &Record<Product>| &r.data.sku)
}

fn price() -> Field<Record<Product>, u32> {
    Field::new("price", |r: &Record<Product>| &r.data.price)
}

fn stock() -> Field<Record<Product>, u32> {
    Field::new("stock", |r: &Record<Product>| &r.data.stock)
}

fn status() -> Field<Record<Product>, Status> {
    Field::new("status", |r: &Record<Product>| &r.data.status)
}

fn listing_mapper() -> PropertyMapper<Record<Product>, ProductListing> {
    PropertyMapper::new(ProductListing::default)
        .map_field(
            "id",
            |r: &Record<Product>| r.id.to_string(),
            |l: &mut ProductListing, id| l.id = id,
        )
        .map_field(
            "sku",
            |r: &Record<Product>| r.data.sku.clone(),
            |l: &mut ProductListing, sku| l.sku = sku,
        )
        .map_field_with(
            "price",
            |r: &Record<Product>| r.data.price,
            |cents| format!("${}.{:02}", cents / 100, cents % 100),
            |l: &mut ProductListing, price| l.price = price,
        )
}

/// Registers a product, rejecting duplicate SKUs.
struct RegisterProduct {
    products: Arc<Products>,
}

#[async_trait]
impl UseCase for RegisterProduct {
    type Input = Product;
    type Output = Record<Product>;

    async fn execute(&self, input: Product) -> DomainResult<Record<Product>> {
        let duplicate = Criteria::new().eq(&sku(), input.sku.clone());
        if self.products.find_one(&duplicate).await?.is_some() {
            let message = format!("sku {} already registered", input.sku);
            return Err(DomainError::conflict(message));
        }
        Ok(self.products.create(input).await?)
    }
}

/// Lists sellable products (active, in stock, priced within a band).
struct ListSellable {
    products: Arc<Products>,
    rule: Specification<Record<Product>>,
    mapper: PropertyMapper<Record<Product>, ProductListing>,
}

#[async_trait]
impl UseCase for ListSellable {
    type Input = ();
    type Output = Vec<ProductListing>;

    async fn execute(&self, _input: ()) -> DomainResult<Vec<ProductListing>> {
        let page = self.products.find_all(QueryParams::new(1, 100)).await?;
        let sellable = self.rule.filter(&page.data);
        Ok(sellable.into_iter().map(|r| self.mapper.map(r)).collect())
    }
}

fn sellable_rule() -> Specification<Record<Product>> {
    SpecificationBuilder::new()
        .equals(&status(), Status::Active)
        .greater_than(&stock(), 0)
        .between(&price(), 100, 10_000)
        .build()
        .expect("rule has clauses")
}

fn product(sku: &str, price: u32, stock: u32) -> Product {
    Product {
        sku: sku.to_string(),
        price,
        stock,
        status: Status::Active,
    }
}

#[tokio::test]
async fn register_then_list_sellable_products() {
    patternkit_observability::init();

    let products = Arc::new(Products::new("products"));
    let register = RegisterProduct {
        products: Arc::clone(&products),
    };

    register.execute(product("LAMP-1", 2_599, 4)).await.unwrap();
    register.execute(product("MUG-1", 50, 10)).await.unwrap();
    register.execute(product("DESK", 18_000, 1)).await.unwrap();
    let chair = register.execute(product("CHAIR", 9_500, 2)).await.unwrap();

    products
        .update(
            &chair.id,
            ProductPatch {
                stock: Some(0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let list = ListSellable {
        products: Arc::clone(&products),
        rule: sellable_rule(),
        mapper: listing_mapper(),
    };

    let listings = list.execute(()).await.unwrap();
    assert_eq!(
        listings,
        vec![ProductListing {
            id: "1".to_string(),
            sku: "LAMP-1".to_string(),
            price: "$25.99".to_string(),
        }]
    );
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let products = Arc::new(Products::new("products"));
    let register = RegisterProduct {
        products: Arc::clone(&products),
    };

    register.execute(product("LAMP-1", 2_599, 4)).await.unwrap();
    let err = register
        .execute(product("LAMP-1", 1_000, 1))
        .await
        .unwrap_err();

    assert_eq!(err.code(), "CONFLICT");
    assert_eq!(products.count(None).await.unwrap(), 1);
}

#[tokio::test]
async fn repository_errors_surface_as_domain_not_found() {
    let products = Products::new("products");
    let err: DomainError = products
        .update(&EntityId::from("999"), ProductPatch::default())
        .await
        .unwrap_err()
        .into();

    assert_eq!(err.code(), "NOT_FOUND");
    assert_eq!(err, DomainError::not_found("Entity with id 999 not found"));
}

#[tokio::test]
async fn archived_products_drop_out_of_negated_rules() {
    let products = Products::new("products");
    let created = products
        .create_many(vec![product("A", 500, 1), product("B", 700, 1)])
        .await
        .unwrap();

    products
        .update(
            &created[1].id,
            ProductPatch {
                status: Some(Status::Archived),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let archived = Specification::equals(&status(), Status::Archived);
    let live = products.find_matching(&archived.not()).await.unwrap();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].data.sku, "A");

    let price_patch = ProductPatch {
        price: Some(450),
        ..Default::default()
    };
    let updated = products
        .update_many(vec![(created[0].id.clone(), price_patch)])
        .await
        .unwrap();
    assert_eq!(updated[0].data.price, 450);
}
