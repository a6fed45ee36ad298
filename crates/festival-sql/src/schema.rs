//! DDL emitted ahead of the data statements when requested.
//!
//! The guarded and flat layouts describe tables the application already owns,
//! so their DDL is `CREATE TABLE IF NOT EXISTS`. The upsert layout is a
//! redesign and its DDL drops and recreates both tables.

/// Schema-preserving `festival_master` / `festival_event` (no unique key on
/// the master; existence checks stand in for it).
pub const GUARDED_SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS festival_master (
  id                 BIGINT AUTO_INCREMENT PRIMARY KEY,
  fstvl_nm           VARCHAR(255) NULL,
  ctprvn_nm          VARCHAR(255) NULL,
  signgu_nm          VARCHAR(255) NULL,
  legaldong_nm       VARCHAR(255) NULL,
  adstrd_nm          VARCHAR(255) NULL,
  zip_no             VARCHAR(255) NULL,
  addr1              VARCHAR(255) NULL,
  tel_no             VARCHAR(255) NULL,
  hmpg_addr          VARCHAR(255) NULL,
  mapx               DOUBLE NULL,
  mapy               DOUBLE NULL,
  first_image_url    VARCHAR(500) NULL,
  first_image_url2   VARCHAR(500) NULL,
  original_image_url VARCHAR(500) NULL,
  image_urls         TEXT NULL,
  overview           TEXT NULL,
  tourapi_content_id BIGINT NULL,
  detail_loaded      BIT(1) NULL
);

CREATE TABLE IF NOT EXISTS festival_event (
  id           BIGINT AUTO_INCREMENT PRIMARY KEY,
  master_id    BIGINT NULL,
  raw_id       VARCHAR(255) NULL,
  fclty_nm     VARCHAR(255) NULL,
  fstvl_start  DATE NULL,
  fstvl_end    DATE NULL,
  origin_nm    VARCHAR(255) NULL,
  data_base_de DATE NULL,
  KEY idx_event_dates (fstvl_start, fstvl_end),
  KEY idx_event_master (master_id),
  CONSTRAINT fk_event_master_legacy
    FOREIGN KEY (master_id) REFERENCES festival_master(id)
);
";

/// Redesigned tables with `uk_master` backing the upsert.
pub const UPSERT_SCHEMA: &str = "\
-- ===== DDL =====
SET FOREIGN_KEY_CHECKS = 0;
DROP TABLE IF EXISTS festival_event;
DROP TABLE IF EXISTS festival_master;
SET FOREIGN_KEY_CHECKS = 1;

CREATE TABLE festival_master (
  id BIGINT AUTO_INCREMENT PRIMARY KEY,
  fstvl_nm     VARCHAR(255) NOT NULL,
  ctprvn_nm    VARCHAR(50)  NOT NULL,
  signgu_nm    VARCHAR(50)  NOT NULL,
  legaldong_nm VARCHAR(255) NULL,
  adstrd_nm    VARCHAR(255) NULL,
  zip_no       VARCHAR(20)  NULL,
  addr1        VARCHAR(255) NULL,
  tel_no       VARCHAR(50)  NULL,
  hmpg_addr    VARCHAR(500) NULL,
  mapx         DOUBLE NULL,
  mapy         DOUBLE NULL,
  first_image_url VARCHAR(1000) NULL,
  overview     TEXT NULL,
  tourapi_content_id BIGINT NULL,
  created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
  updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
  UNIQUE KEY uk_master (fstvl_nm, ctprvn_nm, signgu_nm),
  KEY idx_region (ctprvn_nm, signgu_nm),
  KEY idx_content (tourapi_content_id)
);

CREATE TABLE festival_event (
  id BIGINT AUTO_INCREMENT PRIMARY KEY,
  master_id BIGINT NOT NULL,
  raw_id     VARCHAR(64) NOT NULL,
  lclas_nm   VARCHAR(50) NULL,
  mlsfc_nm   VARCHAR(50) NULL,
  start_date DATE NOT NULL,
  end_date   DATE NOT NULL,
  fstvl_cn   TEXT NULL,
  origin_nm  VARCHAR(100) NULL,
  data_base_de DATE NULL,
  created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
  CONSTRAINT fk_event_master
    FOREIGN KEY (master_id) REFERENCES festival_master(id)
    ON DELETE CASCADE,
  KEY idx_period (start_date, end_date),
  KEY idx_raw (raw_id),
  KEY idx_master (master_id)
);
";

/// The pre-split single table.
pub const FLAT_SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS festival (
  id             BIGINT AUTO_INCREMENT PRIMARY KEY,
  raw_id         VARCHAR(255) NULL,
  lclas_nm       VARCHAR(255) NULL,
  mlsfc_nm       VARCHAR(255) NULL,
  fclty_nm       VARCHAR(255) NULL,
  ctprvn_nm      VARCHAR(255) NULL,
  signgu_nm      VARCHAR(255) NULL,
  legaldong_nm   VARCHAR(255) NULL,
  adstrd_nm      VARCHAR(255) NULL,
  zip_no         VARCHAR(255) NULL,
  fclty_lo       DOUBLE NULL,
  fclty_la       DOUBLE NULL,
  fstvl_begin_de DATE NULL,
  fstvl_end_de   DATE NULL,
  fstvl_cn       TEXT NULL,
  tel_no         VARCHAR(255) NULL,
  hmpg_addr      VARCHAR(255) NULL,
  data_base_de   DATE NULL,
  origin_nm      VARCHAR(255) NULL
);
";
