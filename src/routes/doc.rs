use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    checkout::{
        form::CheckoutForm,
        pricing::{AddonLine, Breakdown, PriceBreakdown},
        steps::CheckoutStep,
    },
    dto::{
        auth::{LoginRequest, LoginResponse},
        cart::{
            AddCustomLoafRequest, AddItemRequest, ApplyPromotionRequest, CartView,
            LoafSelectionRequest, UpdateQuantityRequest,
        },
        catalog::{
            CakeList, CalculateFeeRequest, CustomLoafOptions, DecorationList, FeeData, ZoneList,
        },
        checkout::{CheckoutView, DeliveryFormRequest, PaymentFormRequest, PlacedOrder},
        orders::{OrderList, OrderSummary},
    },
    error::FieldError,
    models::{
        Cake, CakeSize, CartLineItem, Cream, CreamPick, CustomLoafItem, Decoration,
        DecorationPick, DeliveryDetails, DeliveryZone, Flavor, LoafSelection, Order, OrderStatus,
        OrderTotals, PaymentMethod, PaymentSplit, PaymentStatus, Promotion, Topping, ToppingPick,
    },
    response::{ApiResponse, Meta},
    routes::{admin, auth, cart, catalog, checkout, health, orders, params},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        catalog::list_cakes,
        catalog::get_cake,
        catalog::list_decorations,
        catalog::custom_loaf_options,
        catalog::list_zones,
        catalog::calculate_fee,
        cart::view_cart,
        cart::add_item,
        cart::update_quantity,
        cart::remove_item,
        cart::add_custom_loaf,
        cart::remove_custom_loaf,
        cart::apply_promotion,
        cart::clear_cart,
        checkout::get_state,
        checkout::save_delivery,
        checkout::save_payment,
        checkout::go_back,
        checkout::submit,
        orders::list_orders,
        orders::get_order,
        orders::order_summary,
        admin::list_all_orders,
        admin::get_order_admin,
        admin::update_order_status
    ),
    components(
        schemas(
            Cake,
            CakeSize,
            Cream,
            Decoration,
            Flavor,
            Topping,
            DeliveryZone,
            Promotion,
            CartLineItem,
            CreamPick,
            DecorationPick,
            CustomLoafItem,
            LoafSelection,
            ToppingPick,
            OrderTotals,
            PaymentSplit,
            Order,
            OrderStatus,
            PaymentMethod,
            PaymentStatus,
            DeliveryDetails,
            CheckoutStep,
            CheckoutForm,
            PriceBreakdown,
            Breakdown,
            AddonLine,
            FieldError,
            LoginRequest,
            LoginResponse,
            AddItemRequest,
            UpdateQuantityRequest,
            LoafSelectionRequest,
            AddCustomLoafRequest,
            ApplyPromotionRequest,
            CartView,
            CakeList,
            DecorationList,
            ZoneList,
            CustomLoafOptions,
            CalculateFeeRequest,
            FeeData,
            DeliveryFormRequest,
            PaymentFormRequest,
            CheckoutView,
            PlacedOrder,
            OrderList,
            OrderSummary,
            admin::UpdateOrderStatusRequest,
            params::Pagination,
            params::CakeQuery,
            params::OrderListQuery,
            Meta,
            ApiResponse<CartView>,
            ApiResponse<CheckoutView>,
            ApiResponse<PlacedOrder>,
            ApiResponse<OrderList>,
            ApiResponse<OrderSummary>,
            ApiResponse<CakeList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Catalog", description = "Cakes, decorations, custom loaf options and delivery zones"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Checkout", description = "Checkout wizard and order submission"),
        (name = "Orders", description = "Session order history"),
        (name = "Admin", description = "Back-office endpoints"),
        (name = "Auth", description = "Staff authentication"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
