//! Built-in NSIS installer script.
//!
//! Used when no `--nsis-script` is given. Every `${name}` comes from the
//! `/D` definitions built by [`Defines`](super::defines::Defines).

/// Modern UI installer consuming the standard definitions.
pub const NSI_TEMPLATE: &str = r#"Unicode true
!include "MUI2.nsh"

Name "${productName}"
OutFile "${setupname}"
InstallDir "${programFilesDir}\${companyName}\${productName}"
InstallDirRegKey HKLM "Software\${companyName}\${productName}" "InstallDir"
RequestExecutionLevel admin
SetCompressor /SOLID lzma

!define UNINSTALL_KEY "Software\Microsoft\Windows\CurrentVersion\Uninstall\${companyName} ${productName}"

!if "${applicationIcon}" != ""
  !define MUI_ICON "${applicationIcon}"
  !define MUI_UNICON "${applicationIcon}"
!endif

!insertmacro MUI_PAGE_WELCOME
${productLicence}
!insertmacro MUI_PAGE_DIRECTORY
!insertmacro MUI_PAGE_INSTFILES
!define MUI_FINISHPAGE_RUN "$INSTDIR\${applicationFileName}"
!insertmacro MUI_PAGE_FINISH

!insertmacro MUI_UNPAGE_CONFIRM
!insertmacro MUI_UNPAGE_INSTFILES

!insertmacro MUI_LANGUAGE "English"

Section "Install"
  SetOutPath "$INSTDIR"
  File /r "${deployDir}\*.*"

!if "${vcredist2013}" != "none"
  ExecWait '"$INSTDIR\${vcredist2013}" /install /quiet /norestart'
  Delete "$INSTDIR\${vcredist2013}"
!endif

  WriteUninstaller "$INSTDIR\uninstall.exe"
  WriteRegStr HKLM "Software\${companyName}\${productName}" "InstallDir" "$INSTDIR"
  WriteRegStr HKLM "${UNINSTALL_KEY}" "DisplayName" "${productName}"
  WriteRegStr HKLM "${UNINSTALL_KEY}" "DisplayVersion" "${productVersion}"
  WriteRegStr HKLM "${UNINSTALL_KEY}" "Publisher" "${companyName}"
  WriteRegStr HKLM "${UNINSTALL_KEY}" "DisplayIcon" "$INSTDIR\${applicationFileName}"
  WriteRegStr HKLM "${UNINSTALL_KEY}" "UninstallString" '"$INSTDIR\uninstall.exe"'

  CreateDirectory "$SMPROGRAMS\${productName}"
  CreateShortCut "$SMPROGRAMS\${productName}\${productName}.lnk" "$INSTDIR\${applicationFileName}"
  CreateShortCut "$SMPROGRAMS\${productName}\Uninstall ${productName}.lnk" "$INSTDIR\uninstall.exe"
SectionEnd

Section "Uninstall"
  Delete "$SMPROGRAMS\${productName}\${productName}.lnk"
  Delete "$SMPROGRAMS\${productName}\Uninstall ${productName}.lnk"
  RMDir "$SMPROGRAMS\${productName}"
  RMDir /r "$INSTDIR"
  DeleteRegKey HKLM "${UNINSTALL_KEY}"
  DeleteRegKey HKLM "Software\${companyName}\${productName}"
SectionEnd
"#;
