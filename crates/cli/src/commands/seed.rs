//! Seed the product catalog with the default wine sets.

use tracing::{info, warn};

use ruouvan_core::Vnd;
use ruouvan_storefront::db::products::{ProductFilter, ProductRepository};
use ruouvan_storefront::models::{ProductDetails, ProductInput};

/// Insert the default catalog.
///
/// Skips seeding when the catalog already has products, so the command is
/// safe to re-run.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let products = ProductRepository::new(&pool);

    let existing = products.list(&ProductFilter::default()).await?;
    if !existing.is_empty() {
        warn!(
            count = existing.len(),
            "Catalog already has products, skipping seed"
        );
        return Ok(());
    }

    let catalog = default_catalog();
    let total = catalog.len();
    for input in catalog {
        let product = products.create(&input).await?;
        info!(product_id = %product.id, name = %product.name, "Seeded product");
    }

    info!(count = total, "Catalog seeded");
    Ok(())
}

#[allow(clippy::too_many_lines)]
fn default_catalog() -> Vec<ProductInput> {
    let product = |name: &str,
                   kind: &str,
                   category: &str,
                   packaging: &str,
                   volume: &str,
                   price: i64,
                   original_price: Option<i64>,
                   discount: Option<i32>,
                   rating: f64,
                   image: &str,
                   description: &str,
                   details: ProductDetails,
                   story: &str| ProductInput {
        name: name.to_owned(),
        kind: kind.to_owned(),
        category: category.to_owned(),
        packaging: packaging.to_owned(),
        volume: volume.to_owned(),
        price: Vnd::new(price),
        original_price: original_price.map(Vnd::new),
        discount,
        rating,
        image: image.to_owned(),
        description: description.to_owned(),
        details,
        story: story.to_owned(),
    };

    let details = |alcohol: &str,
                   ingredient: &str,
                   aging: &str,
                   serving: &str,
                   pairing: &str,
                   volume: &str| ProductDetails {
        alcohol: alcohol.to_owned(),
        ingredient: ingredient.to_owned(),
        aging: aging.to_owned(),
        serving: serving.to_owned(),
        pairing: pairing.to_owned(),
        volume: volume.to_owned(),
    };

    vec![
        product(
            "Set Rượu Dâu Gia Đình",
            "Rượu Dâu",
            "Bình Dân",
            "Chai Nhựa",
            "1L",
            55_000,
            None,
            None,
            4.4,
            "/images/strawberry-wine-family.jpg",
            "Set rượu dâu tươi mát với hương vị ngọt ngào tự nhiên",
            details(
                "25%",
                "Dâu tây tươi, đường cane, men rượu",
                "Ủ 2 tháng",
                "Uống lạnh hoặc pha với đá",
                "Bánh ngọt, trái cây, kem",
                "1L",
            ),
            "Rượu dâu được làm từ dâu tây tươi ngon nhất, qua quá trình lên men tự nhiên \
             tạo nên hương vị ngọt ngào đặc trưng.",
        ),
        product(
            "Set Rượu Dâu Premium",
            "Rượu Dâu",
            "Quà Tặng",
            "Chai Thủy Tinh",
            "500ml",
            142_500,
            Some(150_000),
            Some(5),
            4.8,
            "/images/strawberry-wine-premium.jpg",
            "Set rượu dâu cao cấp được đóng chai thủy tinh đẹp mắt",
            details(
                "28%",
                "Dâu tây organic, đường thốt nốt, men rượu cao cấp",
                "Ủ 4 tháng",
                "Uống lạnh trong ly rượu vang",
                "Chocolate, bánh kem, pho mát mềm",
                "500ml",
            ),
            "Phiên bản cao cấp của rượu dâu sử dụng dâu tây organic chất lượng cao và \
             đường thốt nốt tự nhiên.",
        ),
        product(
            "Set Rượu Nếp Cẩm Thường",
            "Rượu Nếp Cẩm",
            "Bình Dân",
            "Chai Nhựa",
            "500ml",
            50_000,
            None,
            None,
            4.2,
            "/images/purple-rice-wine-regular.jpg",
            "Set rượu nếp cẩm với màu tím đặc trưng, hương vị thơm ngon",
            details(
                "30%",
                "Nếp cẩm, men rượu truyền thống",
                "Ủ 3 tháng",
                "Uống ở nhiệt độ phòng",
                "Thịt kho, cá nướng, chả lụa",
                "500ml",
            ),
            "Rượu nếp cẩm được làm từ nếp cẩm tự nhiên có màu tím đẹp mắt.",
        ),
        product(
            "Set Rượu Nếp Cẩm Đặc Biệt",
            "Rượu Nếp Cẩm",
            "Quà Tặng",
            "Chai Thủy Tinh",
            "1L",
            133_000,
            Some(140_000),
            Some(5),
            4.6,
            "/images/purple-rice-wine-special.jpg",
            "Set rượu nếp cẩm với màu sắc đẹp mắt",
            details(
                "33%",
                "Nếp cẩm hạt to, men rượu đặc biệt",
                "Ủ 5 tháng",
                "Uống ở nhiệt độ phòng trong ly nhỏ",
                "Thịt nướng, hải sản, bánh chưng",
                "1L",
            ),
            "Phiên bản cao cấp của rượu nếp cẩm sử dụng nếp cẩm hạt to chất lượng cao nhất.",
        ),
        product(
            "Set Rượu Cốm Gia Đình",
            "Rượu Cốm",
            "Bình Dân",
            "Chai Nhựa",
            "500ml",
            48_000,
            None,
            None,
            4.1,
            "/images/rice-wine-family.jpg",
            "Set rượu cốm xanh với hương vị đặc trưng của cốm non tươi",
            details(
                "27%",
                "Cốm xanh tươi, men rượu tự nhiên",
                "Ủ 2 tháng",
                "Uống ở nhiệt độ phòng",
                "Bánh đậu xanh, chè, trái cây",
                "500ml",
            ),
            "Rượu cốm được chế biến từ cốm xanh tươi non, mang hương vị đặc trưng của \
             mùa thu Hà Nội.",
        ),
        product(
            "Set Rượu Cốm Hảo Hạng",
            "Rượu Cốm",
            "Quà Tặng",
            "Chai Thủy Tinh",
            "500ml",
            128_250,
            Some(135_000),
            Some(5),
            4.5,
            "/images/rice-wine-premium.jpg",
            "Set rượu cốm cao cấp được chế biến từ cốm xanh tươi",
            details(
                "30%",
                "Cốm xanh cao cấp, men rượu đặc biệt",
                "Ủ 4 tháng",
                "Uống ở nhiệt độ phòng trong ly nhỏ",
                "Bánh trung thu, trà xanh, bánh quy",
                "500ml",
            ),
            "Phiên bản cao cấp của rượu cốm sử dụng cốm xanh tươi nhất trong mùa.",
        ),
        product(
            "Set Rượu Mơ Truyền Thống",
            "Rượu Mơ",
            "Bình Dân",
            "Chai Nhựa",
            "1L",
            75_000,
            None,
            None,
            4.2,
            "/images/plum-wine-traditional.jpg",
            "Set rượu mơ truyền thống với hương vị thơm ngon đặc trưng",
            details(
                "26%",
                "Mơ chín tự nhiên, đường cane, men rượu",
                "Ủ 3 tháng",
                "Uống lạnh hoặc ở nhiệt độ phòng",
                "Bánh tráng nướng, hạt điều, trái cây khô",
                "1L",
            ),
            "Rượu mơ được chế biến từ những trái mơ chín tự nhiên, có hương thơm đặc \
             trưng và vị ngọt dịu.",
        ),
        product(
            "Set Rượu Mơ Đặc Biệt",
            "Rượu Mơ",
            "Quà Tặng",
            "Chai Thủy Tinh",
            "500ml",
            165_000,
            None,
            None,
            4.9,
            "/images/plum-wine-special.jpg",
            "Set rượu mơ cao cấp với hương vị thơm ngon đặc trưng",
            details(
                "30%",
                "Mơ organic cao cấp, đường thốt nốt, men rượu đặc biệt",
                "Ủ 6 tháng",
                "Uống lạnh trong ly rượu vang",
                "Chocolate đen, bánh tart, pho mát cứng",
                "500ml",
            ),
            "Phiên bản cao cấp nhất của rượu mơ sử dụng mơ organic chất lượng cao và \
             quy trình ủ lâu.",
        ),
    ]
}
